//! Hooks for watching a simulation advance.

/// Callbacks invoked while a [`Simulation`](crate::simulation::Simulation)
/// runs a fixed step. Every method defaults to a no-op.
pub trait StepObserver {
    /// After each force evaluation. Euler evaluates once per step, leapfrog
    /// twice and RK4 four times.
    fn on_force_evaluation(&mut self) {}

    /// After the integrator has moved every point.
    fn on_integrate(&mut self) {}

    /// When a fixed step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// Observer that ignores every callback.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
