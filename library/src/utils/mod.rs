pub(crate) mod frame_statistics;
