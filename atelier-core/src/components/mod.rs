pub mod badge;
pub mod color_palette;
pub mod file_upload;
pub mod nav;
pub mod status_card;
pub mod ticket_modal;

pub use badge::{Badge, BadgeVariant, ToBadge};
pub use color_palette::ColorPalette;
pub use file_upload::{FileUpload, SelectedFile, UploadOutcome};
pub use nav::{active_item, NavItem, NAVIGATION};
pub use status_card::{CardVariant, StatusCard};
pub use ticket_modal::{TicketForm, TicketModal, TicketSubmission};
