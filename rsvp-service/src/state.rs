use std::sync::Arc;

use wedding_shared::auth::SessionCodec;

/// Per-request application state: the row store, the session codec and
/// the cookie security policy.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub codec: SessionCodec,
    pub secure_cookies: bool,
}

// Manual impl: cloning goes through the Arc, no S: Clone bound.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        AppState {
            store: Arc::clone(&self.store),
            codec: self.codec.clone(),
            secure_cookies: self.secure_cookies,
        }
    }
}
