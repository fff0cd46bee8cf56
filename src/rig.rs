pub(crate) mod authored;
pub(crate) mod model;
pub(crate) mod pose;
pub(crate) mod skeleton;
