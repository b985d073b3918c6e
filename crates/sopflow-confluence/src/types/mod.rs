//! Confluence API types.

mod group;
mod page;
mod state;

pub use group::{Group, GroupMember, GroupMembersResponse, GroupPickerResponse};
pub use page::{Body, Label, LabelList, Links, Page, PageList, Space, Storage, Version};
pub use state::{ContentState, ContentStateResponse, SpaceStatesResponse};
