pub mod dispatcher;
pub mod id;
pub mod menu;
pub mod page;
pub mod pagination;
pub mod registry;

pub use menu::{Menu, MenuStopHandle};
pub use page::{MenuPage, PageAction, PageContext, RenderPayload};
pub use registry::{
    ComponentEvent, ComponentHandler, ComponentKind, ComponentRegistry, StopHandle,
};
