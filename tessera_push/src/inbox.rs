// Controller inbox: funnels raw MIDI messages from any thread to the frame
// loop.
//
// MIDI drivers usually deliver input on their own callback thread. Rather
// than share the `Grid` across threads, input threads hold an
// `InboxSender` (cheap to clone) and push raw byte messages; the frame loop
// owns the `Inbox` and calls `drain()` once at the start of each frame,
// before `calculate()`. The grid therefore has exactly one owner and the
// loop never blocks on input.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::PushError;

/// Sending half. Clone one per input source.
#[derive(Clone, Debug)]
pub struct InboxSender {
    tx: Sender<Vec<u8>>,
}

impl InboxSender {
    /// Queue one raw MIDI message. Fails only once the `Inbox` is dropped.
    pub fn send(&self, bytes: &[u8]) -> Result<(), PushError> {
        self.tx
            .send(bytes.to_vec())
            .map_err(|_| PushError::InboxClosed)
    }
}

/// Receiving half, owned by the frame loop.
#[derive(Debug)]
pub struct Inbox {
    rx: Receiver<Vec<u8>>,
}

impl Inbox {
    /// Everything queued so far, oldest first. Never blocks.
    pub fn drain(&self) -> Vec<Vec<u8>> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }
}

pub fn inbox() -> (InboxSender, Inbox) {
    let (tx, rx) = mpsc::channel();
    (InboxSender { tx }, Inbox { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn drain_returns_messages_in_order() {
        let (tx, inbox) = inbox();
        tx.send(&[0xB0, 71, 1]).unwrap();
        tx.send(&[0x90, 36, 100]).unwrap();
        assert_eq!(inbox.drain(), vec![vec![0xB0, 71, 1], vec![0x90, 36, 100]]);
        assert!(inbox.drain().is_empty());
    }

    #[test]
    fn messages_from_other_threads_arrive() {
        let (tx, inbox) = inbox();
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let tx = tx.clone();
                thread::spawn(move || tx.send(&[0x90, 36 + i, 100]))
            })
            .collect();
        for h in handles {
            h.join().unwrap().unwrap();
        }
        let mut notes: Vec<u8> = inbox.drain().iter().map(|m| m[1]).collect();
        notes.sort_unstable();
        assert_eq!(notes, vec![36, 37, 38, 39]);
    }

    #[test]
    fn send_after_drop_is_an_error() {
        let (tx, inbox) = inbox();
        drop(inbox);
        assert!(matches!(tx.send(&[0x90, 36, 1]), Err(PushError::InboxClosed)));
    }
}
