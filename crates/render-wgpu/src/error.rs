/// Errors from bringing up the GPU side. All of them abort startup.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),
    #[error("render pipeline creation failed: {0}")]
    PipelineLink(String),
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter found")]
    Adapter,
    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
