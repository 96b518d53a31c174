//! The five-sink callback surface invoked by [`crate::handler::MessageHandler`].
//!
//! Grounded in the Python reference's `NullCallbacks` class
//! (`vimpair/protocol/protocol.py`): every sink defaults to a no-op, so a
//! caller only interested in, say, content updates never has to guard the
//! other four call sites.

/// Record of callbacks the decoder invokes as frames are dispatched.
///
/// Built fluently, mirroring the teacher's `MessageBuilder` chained-method
/// style:
///
/// ```
/// use vimpair_protocol::Callbacks;
///
/// let mut seen = String::new();
/// let mut callbacks = Callbacks::new().on_update_contents(|text| seen = text.to_string());
/// callbacks.update_contents("hello");
/// assert_eq!(seen, "hello");
/// ```
pub struct Callbacks<'a> {
    update_contents: Box<dyn FnMut(&str) + 'a>,
    apply_cursor_position: Box<dyn FnMut(u64, u64) + 'a>,
    take_control: Box<dyn FnMut() + 'a>,
    file_changed: Box<dyn FnMut(&str) + 'a>,
    save_file: Box<dyn FnMut() + 'a>,
}

impl<'a> Default for Callbacks<'a> {
    fn default() -> Self {
        Self {
            update_contents: Box::new(|_| {}),
            apply_cursor_position: Box::new(|_, _| {}),
            take_control: Box::new(|| {}),
            file_changed: Box::new(|_| {}),
            save_file: Box::new(|| {}),
        }
    }
}

impl<'a> Callbacks<'a> {
    /// Construct a callback set where every sink is a no-op.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_update_contents(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.update_contents = Box::new(f);
        self
    }

    #[must_use]
    pub fn on_cursor_position(mut self, f: impl FnMut(u64, u64) + 'a) -> Self {
        self.apply_cursor_position = Box::new(f);
        self
    }

    #[must_use]
    pub fn on_take_control(mut self, f: impl FnMut() + 'a) -> Self {
        self.take_control = Box::new(f);
        self
    }

    #[must_use]
    pub fn on_file_changed(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.file_changed = Box::new(f);
        self
    }

    #[must_use]
    pub fn on_save_file(mut self, f: impl FnMut() + 'a) -> Self {
        self.save_file = Box::new(f);
        self
    }

    pub(crate) fn update_contents(&mut self, text: &str) {
        (self.update_contents)(text);
    }

    pub(crate) fn apply_cursor_position(&mut self, line: u64, column: u64) {
        (self.apply_cursor_position)(line, column);
    }

    pub(crate) fn take_control(&mut self) {
        (self.take_control)();
    }

    pub(crate) fn file_changed(&mut self, filename: &str) {
        (self.file_changed)(filename);
    }

    pub(crate) fn save_file(&mut self) {
        (self.save_file)();
    }
}
