
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// DisposeToken struct
/// Identifies one registered dispose callback. Tokens are unique for the whole process, so a token
/// from one manager can never cancel another manager's callback.
#[repr(C)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct DisposeToken {
    id: u64
}

impl DisposeToken {

    fn next() -> Self {
        Self { id: NEXT_TOKEN.fetch_add(1, Ordering::Relaxed) }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Callbacks waiting for a manager's disposal, in registration order.
pub(crate) struct DisposeHooks {
    callbacks: Vec<(DisposeToken, Box<dyn FnOnce()>)>
}

impl DisposeHooks {

    pub(crate) fn new() -> Self {
        Self { callbacks: vec![] }
    }

    pub(crate) fn register(&mut self, callback: Box<dyn FnOnce()>) -> DisposeToken {
        let token = DisposeToken::next();
        self.callbacks.push((token, callback));
        token
    }

    pub(crate) fn cancel(&mut self, token: DisposeToken) -> bool {
        match self.callbacks.iter().position(|(registered, _)| *registered == token) {
            Some(index) => {
                self.callbacks.remove(index);
                true
            },
            None => false
        }
    }

    /// Each callback runs at most once; the list is emptied before any of them is invoked.
    pub(crate) fn run_all(&mut self) {
        let callbacks = std::mem::take(&mut self.callbacks);
        for (_, callback) in callbacks {
            callback();
        }
    }
}
