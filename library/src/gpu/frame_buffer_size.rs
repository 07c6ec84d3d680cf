#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct FrameBufferSize {
    width: u32,
    height: u32,
}

impl FrameBufferSize {
    #[must_use]
    pub(crate) fn new(width: u32, height: u32) -> Self {
        assert!(width > 0);
        assert!(height > 0);
        Self { width, height }
    }

    #[must_use]
    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub(crate) fn height(&self) -> u32 {
        self.height
    }
}
