//! Broadcast of reset states across cooperating workers
//!
//! Only resets are synchronized. One worker (the root) draws a fresh world
//! and every worker in the group leaves `broadcast` holding that same world.
//! Individual steps never cross worker boundaries.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use thiserror::Error;

use crate::sim::WorldState;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MessagingError {
    #[error("root rank {root} outside group of {size}")]
    InvalidRoot { root: usize, size: usize },
    #[error("worker {rank} left the group")]
    Disconnected { rank: usize },
    #[error("timed out after {0:?} waiting for the group")]
    Timeout(Duration),
    #[error("unexpected message on rank {rank}")]
    Unexpected { rank: usize },
}

/// Collective broadcast of a world snapshot
///
/// Every member calls `broadcast` with the same `root`; each call returns
/// the state passed in by the root. The call blocks until the group
/// operation completes.
pub trait Broadcast {
    fn rank(&self) -> usize;

    fn size(&self) -> usize;

    fn broadcast(&mut self, state: WorldState, root: usize) -> Result<WorldState, MessagingError>;
}

/// A group of one. Broadcasting returns the input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solo;

impl Broadcast for Solo {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn broadcast(&mut self, state: WorldState, root: usize) -> Result<WorldState, MessagingError> {
        if root != 0 {
            return Err(MessagingError::InvalidRoot { root, size: 1 });
        }
        Ok(state)
    }
}

#[derive(Debug, Clone, Copy)]
enum Packet {
    State { round: u64, state: WorldState },
    Ack { round: u64 },
}

impl Packet {
    fn round(&self) -> u64 {
        match self {
            Packet::State { round, .. } | Packet::Ack { round } => *round,
        }
    }
}

/// One member of an in-process worker group
///
/// Built with [`ChannelGroup::group`], one endpoint per worker thread. The
/// root sends its state to every peer and then waits for every peer to
/// acknowledge, so no worker can act on a stale world after a reset.
///
/// Every packet carries the number of the broadcast it belongs to. Members
/// call `broadcast` collectively, failed calls included, so their counters
/// stay in step; packets left over from an abandoned round are dropped and
/// packets from a round this member has not reached yet are held back.
///
/// Without a timeout a member waits for as long as any other member is
/// alive. In a group of three or more, a follower whose root has gone away
/// blocks forever because the remaining followers still hold senders to its
/// inbox. Set [`ChannelGroup::with_timeout`] whenever a peer may fail.
pub struct ChannelGroup {
    rank: usize,
    /// Indexed by rank; `None` for this member
    peers: Vec<Option<Sender<Packet>>>,
    inbox: Receiver<Packet>,
    timeout: Option<Duration>,
    /// Broadcasts started so far
    round: u64,
    /// Packets that arrived ahead of this member's round
    early: VecDeque<Packet>,
}

impl ChannelGroup {
    /// Create a fully connected group of `size` members
    pub fn group(size: usize) -> Vec<ChannelGroup> {
        let (senders, receivers): (Vec<_>, Vec<_>) = (0..size).map(|_| unbounded()).unzip();

        receivers
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| ChannelGroup {
                rank,
                peers: senders
                    .iter()
                    .enumerate()
                    .map(|(r, tx)| (r != rank).then(|| tx.clone()))
                    .collect(),
                inbox,
                timeout: None,
                round: 0,
                early: VecDeque::new(),
            })
            .collect()
    }

    /// Fail a broadcast instead of waiting forever on a stalled peer
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn send(&self, to: usize, packet: Packet) -> Result<(), MessagingError> {
        match &self.peers[to] {
            Some(tx) => tx
                .send(packet)
                .map_err(|_| MessagingError::Disconnected { rank: to }),
            None => Err(MessagingError::Unexpected { rank: self.rank }),
        }
    }

    fn next_packet(
        &self,
        from: usize,
        deadline: Option<Instant>,
    ) -> Result<Packet, MessagingError> {
        match (deadline, self.timeout) {
            (Some(deadline), Some(timeout)) => {
                self.inbox.recv_deadline(deadline).map_err(|e| match e {
                    RecvTimeoutError::Timeout => MessagingError::Timeout(timeout),
                    RecvTimeoutError::Disconnected => {
                        MessagingError::Disconnected { rank: from }
                    }
                })
            }
            _ => self
                .inbox
                .recv()
                .map_err(|_| MessagingError::Disconnected { rank: from }),
        }
    }

    /// Next packet of the current round, skipping stale ones
    fn recv(&mut self, from: usize, deadline: Option<Instant>) -> Result<Packet, MessagingError> {
        let round = self.round;
        self.early.retain(|p| p.round() >= round);
        if let Some(i) = self.early.iter().position(|p| p.round() == round) {
            if let Some(packet) = self.early.remove(i) {
                return Ok(packet);
            }
        }

        loop {
            let packet = self.next_packet(from, deadline)?;
            if packet.round() == round {
                return Ok(packet);
            } else if packet.round() > round {
                self.early.push_back(packet);
            } else {
                log::debug!(
                    "rank {} dropped packet from abandoned round {}",
                    self.rank,
                    packet.round()
                );
            }
        }
    }
}

impl Broadcast for ChannelGroup {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.peers.len()
    }

    fn broadcast(&mut self, state: WorldState, root: usize) -> Result<WorldState, MessagingError> {
        self.round += 1;
        let round = self.round;
        let deadline = self.timeout.map(|t| Instant::now() + t);

        let size = self.size();
        if root >= size {
            return Err(MessagingError::InvalidRoot { root, size });
        }

        if self.rank == root {
            for peer in (0..size).filter(|&r| r != root) {
                self.send(peer, Packet::State { round, state })?;
            }
            for _ in 1..size {
                match self.recv(root, deadline)? {
                    Packet::Ack { .. } => {}
                    Packet::State { .. } => {
                        return Err(MessagingError::Unexpected { rank: self.rank });
                    }
                }
            }
            log::debug!("rank {} broadcast reset {} to {} peers", root, round, size - 1);
            Ok(state)
        } else {
            match self.recv(root, deadline)? {
                Packet::State { state: received, .. } => {
                    self.send(root, Packet::Ack { round })?;
                    Ok(received)
                }
                Packet::Ack { .. } => Err(MessagingError::Unexpected { rank: self.rank }),
            }
        }
    }
}
