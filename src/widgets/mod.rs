pub mod collapsible;
pub mod content;
pub mod node_ref;

pub use collapsible::Collapsible;
pub use content::{
    Block, Child, Children, Column, Content, IntoChild, Text, block, column, measure_children,
    text,
};
pub use node_ref::NodeRef;
