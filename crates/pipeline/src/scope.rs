// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A minimal cancellation scope: a `watch` channel flipped once to signal
//! every outstanding plugin and workflow run to wind down.

use tokio::sync::watch;

#[derive(Clone)]
pub struct Scope {
    rx: watch::Receiver<bool>,
}

pub struct ScopeHandle {
    tx: watch::Sender<bool>,
}

pub fn scope() -> (ScopeHandle, Scope) {
    let (tx, rx) = watch::channel(false);
    (ScopeHandle { tx }, Scope { rx })
}

impl ScopeHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl Scope {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    pub async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}
