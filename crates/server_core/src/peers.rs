//! In-process peer table standing in for the transport's peer list.

use glam::Vec3;
use zone_core::SessionId;

use crate::external::{Peer, PeerRegistry};

#[derive(Default, Debug)]
pub struct PeerTable {
    peers: Vec<Peer>,
}

impl PeerTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Register a peer; reconnecting an existing session just moves it.
    pub fn connect(&mut self, session: SessionId, ref_pos: Vec3) {
        if let Some(p) = self.get_mut(session) {
            p.ref_pos = ref_pos;
            return;
        }
        self.peers.push(Peer { session, ref_pos });
    }

    /// Drop a peer. Returns `false` if it was not connected.
    pub fn disconnect(&mut self, session: SessionId) -> bool {
        let before = self.peers.len();
        self.peers.retain(|p| p.session != session);
        self.peers.len() != before
    }

    pub fn set_ref_pos(&mut self, session: SessionId, ref_pos: Vec3) -> bool {
        match self.get_mut(session) {
            Some(p) => {
                p.ref_pos = ref_pos;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, session: SessionId) -> Option<&Peer> {
        self.peers.iter().find(|p| p.session == session)
    }

    fn get_mut(&mut self, session: SessionId) -> Option<&mut Peer> {
        self.peers.iter_mut().find(|p| p.session == session)
    }
}

impl PeerRegistry for PeerTable {
    fn peers(&self) -> &[Peer] {
        &self.peers
    }
}
