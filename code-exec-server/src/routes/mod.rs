pub(crate) mod execute;
pub(crate) mod tracker;
