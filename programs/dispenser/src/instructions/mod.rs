pub mod crowdfund;
pub mod dispenser_dispense;
pub mod dispenser_request;
pub mod dispenser_set_code;
pub mod platform_initialize;
pub mod ticket_dispense;
pub mod ticket_info_add;
pub mod ticket_info_update;
pub mod ticket_request;
pub mod ticket_request_more;
pub mod ticket_request_review;
pub mod ticket_use;

pub use crowdfund::*;
pub use dispenser_dispense::*;
pub use dispenser_request::*;
pub use dispenser_set_code::*;
pub use platform_initialize::*;
pub use ticket_dispense::*;
pub use ticket_info_add::*;
pub use ticket_info_update::*;
pub use ticket_request::*;
pub use ticket_request_more::*;
pub use ticket_request_review::*;
pub use ticket_use::*;
