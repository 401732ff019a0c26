//! Objects (such as windows and rectangles) the gesture engine works with.
mod direction;
mod window;
mod xyhw;

pub use direction::Direction;
pub use window::Handle;
#[cfg(test)]
pub(crate) use window::MockHandle;
pub use window::WindowHandle;
pub use xyhw::Xyhw;
pub use xyhw::XyhwBuilder;
