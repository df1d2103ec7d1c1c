// Run finalizer - closes the run with its aggregate status

use std::sync::Arc;
use tracing::{info, warn};

use crate::session::RunSession;
use crate::state::RunStatus;

/// Consumed by [`RunFinalizer::finalize`], so a run is closed at most once per finalizer
pub struct RunFinalizer {
    session: Arc<RunSession>,
}

impl RunFinalizer {
    pub fn new(session: Arc<RunSession>) -> Self {
        Self { session }
    }

    /// Send the final status. Returns whether the run was closed.
    pub fn finalize(self, status: RunStatus) -> bool {
        match self.session.finish(status) {
            Ok(true) => {
                info!(
                    "Finished Testomatio run {} ({})",
                    self.session.id().unwrap_or_default(),
                    status
                );
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!("Error updating run status, skipping...");
                warn!("{}", e);
                false
            }
        }
    }
}
