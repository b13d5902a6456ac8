//! Shared fixtures for the integration tests: scripted seats, a recording
//! observer and an evaluator with a fixed ranking.

#![allow(dead_code)]

use async_trait::async_trait;
use holdem_engine::game::{
    Collaborators,
    entities::{Blinds, Card, Chips, GameEvent, GameView, Player, RandomDeck, SeatIndex, Username},
    interfaces::{BetRequest, DecisionError, Decider, HandEvaluator, ViewSink},
    round::RotatingSeating,
};
use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// What a scripted seat does once its script runs out.
#[derive(Clone, Copy, Debug)]
pub enum Then {
    /// Match the table bet (check when nothing is owed).
    Call,
    /// Answer zero: check when free, fold otherwise.
    Fold,
}

/// Seat answering from a fixed list of amounts.
#[derive(Debug)]
pub struct ScriptedDecider {
    answers: Mutex<VecDeque<Chips>>,
    then: Then,
    requests: Mutex<Vec<BetRequest>>,
}

impl ScriptedDecider {
    pub fn new(answers: &[Chips], then: Then) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            then,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calling() -> Arc<Self> {
        Self::new(&[], Then::Call)
    }

    pub fn folding() -> Arc<Self> {
        Self::new(&[], Then::Fold)
    }

    /// Every request this seat was asked, in order.
    pub fn requests(&self) -> Vec<BetRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Decider for ScriptedDecider {
    async fn bet_minimum_of(&self, request: &BetRequest) -> Result<Chips, DecisionError> {
        self.requests.lock().unwrap().push(request.clone());
        let scripted = self.answers.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or(match self.then {
            Then::Call => request.required,
            Then::Fold => 0,
        }))
    }
}

/// Seat whose transport is gone.
#[derive(Debug, Default)]
pub struct DisconnectedDecider;

#[async_trait]
impl Decider for DisconnectedDecider {
    async fn bet_minimum_of(&self, _request: &BetRequest) -> Result<Chips, DecisionError> {
        Err(DecisionError::Disconnected)
    }
}

/// Seat that drops its first `failures` requests, then calls.
#[derive(Debug)]
pub struct FlakyDecider {
    failures: AtomicUsize,
}

impl FlakyDecider {
    pub fn new(failures: usize) -> Arc<Self> {
        Arc::new(Self {
            failures: AtomicUsize::new(failures),
        })
    }
}

#[async_trait]
impl Decider for FlakyDecider {
    async fn bet_minimum_of(&self, request: &BetRequest) -> Result<Chips, DecisionError> {
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            Err(DecisionError::Disconnected)
        } else {
            Ok(request.required)
        }
    }
}

/// Observer keeping every event and the number of views published.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<GameEvent>>,
    views: Mutex<Vec<GameView>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn views(&self) -> Vec<GameView> {
        self.views.lock().unwrap().clone()
    }
}

#[async_trait]
impl ViewSink for RecordingSink {
    async fn announce(&self, event: &GameEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    async fn update_view(&self, view: &GameView) {
        self.views.lock().unwrap().push(view.clone());
    }
}

/// Evaluator ranking seats instead of cards. Seats in an earlier tier beat
/// seats in a later one; seats sharing a tier tie. Seats in no tier never
/// win, so an empty ranking never resolves a showdown.
#[derive(Clone, Debug, Default)]
pub struct RankedEvaluator {
    tiers: Vec<Vec<SeatIndex>>,
    calls: Arc<AtomicUsize>,
}

impl RankedEvaluator {
    pub fn new(tiers: &[&[SeatIndex]]) -> Self {
        Self {
            tiers: tiers.iter().map(|tier| tier.to_vec()).collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HandEvaluator for RankedEvaluator {
    fn determine_winners(&self, _board: &[Card], hands: &[(SeatIndex, Vec<Card>)]) -> Vec<usize> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for tier in &self.tiers {
            let winners: Vec<usize> = hands
                .iter()
                .enumerate()
                .filter(|(_, (seat, _))| tier.contains(seat))
                .map(|(idx, _)| idx)
                .collect();
            if !winners.is_empty() {
                return winners;
            }
        }
        Vec::new()
    }
}

pub fn player(seat: SeatIndex, stack: Chips, decider: Arc<dyn Decider>) -> Player {
    Player::with_stack(seat, Username::new(&format!("p{seat}")), stack, decider)
}

pub fn name(seat: SeatIndex) -> Username {
    Username::new(&format!("p{seat}"))
}

pub fn blinds(small: Chips, big: Chips) -> Blinds {
    Blinds { small, big }
}

/// Random deck, rotating button, the given evaluator and observer.
pub fn collaborators(evaluator: &RankedEvaluator, sink: &Arc<RecordingSink>) -> Collaborators {
    Collaborators {
        deck: Box::new(RandomDeck),
        evaluator: Box::new(evaluator.clone()),
        seating: Box::new(RotatingSeating),
        view: Arc::clone(sink) as Arc<dyn ViewSink>,
    }
}
