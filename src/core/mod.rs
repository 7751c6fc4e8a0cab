mod clock;
mod frame;
mod gpu_context;
mod timer;

pub use clock::Clock;
pub use frame::FrameInfo;
pub use gpu_context::GpuContext;
pub use timer::FpsCounter;
