/// Parameters shared by the capture state machines.
#[derive(Debug, Clone, Copy)]
pub struct CaptureConfig {
    /// Ground-plane distance below which a point closes the wall loop.
    pub closing_epsilon: f64,
    /// Thickness given to every wall created during capture.
    pub wall_thickness: f64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            closing_epsilon: 0.2,
            wall_thickness: 0.1,
        }
    }
}
