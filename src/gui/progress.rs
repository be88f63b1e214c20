// src/gui/progress.rs
use crate::progress::Progress;

/// Mirrors pipeline progress into the status line.
pub struct GuiProgress<'a> {
    status: &'a mut String,
    done: usize,
    total: usize,
}

impl<'a> GuiProgress<'a> {
    pub fn new(status: &'a mut String) -> Self {
        Self { status, done: 0, total: 0 }
    }
}

impl Progress for GuiProgress<'_> {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        *self.status = s!(msg);
    }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        *self.status = format!("Loaded {} ({}/{})", label, self.done, self.total);
    }
    fn finish(&mut self) {
        if self.done == self.total && self.total > 0 {
            *self.status = format!("Updated ({}/{})", self.done, self.total);
        }
    }
}
