pub(crate) mod bands;
pub(crate) mod pivots;
pub(crate) mod segmenter;
