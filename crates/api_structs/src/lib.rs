mod notification;
mod property;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::notification::dtos::*;
    pub use crate::property::dtos::*;
    pub use crate::reminder::dtos::*;
}

pub use crate::notification::api::*;
pub use crate::property::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
