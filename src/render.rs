pub(crate) mod frame;
pub(crate) mod kinematic;
pub(crate) mod pipeline;
pub(crate) mod transform;
