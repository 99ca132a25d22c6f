pub mod assistant;
pub mod completion;
pub mod contact;
pub mod transcript;
pub mod widget;
