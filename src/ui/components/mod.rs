pub mod input_bar;
pub mod message_list;
pub mod phase_banner;

pub use input_bar::InputBar;
pub use message_list::MessageList;
pub use phase_banner::PhaseBanner;
