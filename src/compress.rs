pub(crate) mod rects;
