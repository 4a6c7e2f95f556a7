use chrono::NaiveDate;
use rand::Rng;

use crate::error::RosterError;
use crate::presenter::Presenter;
use crate::roster::draw::TeamDraw;
use crate::roster::payment::{PaymentMethod, PaymentRecord};
use crate::roster::slots::{GOALKEEPER_CAPACITY, MAIN_CAPACITY};
use crate::roster::RosterState;
use crate::save::RosterStore;

/// The roster engine: every state transition lives here.
///
/// Operations validate their arguments, mutate the in-memory state, push a
/// snapshot to the injected store and return the rendered roster as the
/// reply text. Store failures are logged and never surfaced; the in-memory
/// state stays authoritative until the next successful save.
///
/// All mutations take `&mut self`, so a concurrent embedding has to
/// serialize commands through a mutex or a single-owner task.
pub struct RosterEngine<S: RosterStore> {
    state: RosterState,
    store: S,
    presenter: Presenter,
}

impl<S: RosterStore> RosterEngine<S> {
    /// Load the persisted snapshot from `store` and start from it.
    pub fn new(store: S, presenter: Presenter) -> Self {
        let state = RosterState::from_snapshot(store.load());
        Self { state, store, presenter }
    }

    /// Start from an explicit state, ignoring whatever the store holds.
    pub fn with_state(state: RosterState, store: S, presenter: Presenter) -> Self {
        Self { state, store, presenter }
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    /// Rendered roster without mutating anything.
    pub fn view(&self, today: NaiveDate) -> String {
        self.presenter.render(&self.state, today)
    }

    /// Self-service entry: first empty goalkeeper seat, or first empty
    /// main seat, or the tail of the wait queue. Rejected while the
    /// roster is closed.
    pub fn add_participant(
        &mut self,
        name: &str,
        as_goalkeeper: bool,
        today: NaiveDate,
    ) -> Result<String, RosterError> {
        if !self.state.is_open {
            return Err(RosterError::RosterClosed);
        }

        self.insert(name, as_goalkeeper)?;
        self.persist();
        Ok(self.view(today))
    }

    /// Self-service removal by name. The goalkeeper branch and the
    /// field-pool branch are independent: someone seated in both lists is
    /// cleared from both in one call when `as_goalkeeper` is set.
    pub fn remove_participant(
        &mut self,
        name: &str,
        as_goalkeeper: bool,
        today: NaiveDate,
    ) -> Result<String, RosterError> {
        if !self.state.is_open {
            return Err(RosterError::RosterClosed);
        }

        let goal_seat = self.state.goalkeepers.position_of(name);
        let main_seat = self.state.main.position_of(name);
        let queue_seat = self.state.queue_position(name);

        if goal_seat.is_none() && main_seat.is_none() && queue_seat.is_none() {
            return Err(RosterError::NotFound { name: name.to_string() });
        }

        if as_goalkeeper {
            if let Some(seat) = goal_seat {
                self.state.goalkeepers.clear(seat);
            }
        }

        if let Some(seat) = main_seat {
            self.state.main.clear(seat);
            self.promote(seat);
        } else if queue_seat.is_some() {
            // Leaving the queue shifts everyone behind up one place.
            self.state.remove_from_queue(name);
        }

        self.persist();
        Ok(self.view(today))
    }

    /// Admin removal by 1-based position. Works while the roster is
    /// closed; desisting players are pulled by an admin in that window.
    pub fn remove_by_position(
        &mut self,
        position: usize,
        as_goalkeeper: bool,
        today: NaiveDate,
    ) -> Result<String, RosterError> {
        let index = Self::seat_index(
            position,
            if as_goalkeeper { GOALKEEPER_CAPACITY } else { MAIN_CAPACITY },
        )?;

        if as_goalkeeper {
            if self.state.goalkeepers.is_empty_at(index) {
                return Err(RosterError::EmptySlot { position });
            }
            self.state.goalkeepers.clear(index);
        } else {
            if self.state.main.is_empty_at(index) {
                return Err(RosterError::EmptySlot { position });
            }
            self.state.main.clear(index);
            self.promote(index);
        }

        self.persist();
        Ok(self.view(today))
    }

    /// Record a payment for the player seated at `position`, dated `date`.
    /// The seat stays occupied; the presenter marks it paid from the
    /// ledger. A second record for the same player and date is rejected.
    pub fn record_payment(
        &mut self,
        position: usize,
        method: PaymentMethod,
        date: NaiveDate,
    ) -> Result<String, RosterError> {
        let index = Self::seat_index(position, MAIN_CAPACITY)?;

        let name = self
            .state
            .main
            .get(index)
            .ok_or(RosterError::EmptySlot { position })?
            .to_string();

        self.state.ledger.record(&name, method, date)?;
        log::info!("payment recorded: {} {} on {}", name, method, date);

        self.persist();
        Ok(self.view(date))
    }

    /// Seat a whole list at once, in input order. Names that do not fit or
    /// are already registered are skipped, not reported; the caller only
    /// gets the final roster. Admin command, so the gate does not apply.
    pub fn bulk_add(&mut self, names: &[String], as_goalkeeper: bool, today: NaiveDate) -> String {
        for name in names {
            if let Err(err) = self.insert(name, as_goalkeeper) {
                log::debug!("bulk add skipped {:?}: {}", name, err);
            }
        }
        self.persist();
        self.view(today)
    }

    /// Cycle rollover: goalkeepers and wait queue are cleared, the main
    /// roster is reseeded from `seeds` (extras beyond capacity dropped).
    /// The ledger is dated, not cleared; past cycles keep their records.
    pub fn reset_cycle(&mut self, seeds: &[String], today: NaiveDate) -> String {
        self.state.goalkeepers.fill_from(&[]);
        self.state.wait_queue.clear();
        self.state.main.fill_from(seeds);
        log::info!("cycle reset with {} seeded players", self.state.main.occupied_count());

        self.persist();
        self.view(today)
    }

    pub fn open_cycle(&mut self, today: NaiveDate) -> String {
        self.state.is_open = true;
        log::info!("roster opened");

        self.persist();
        self.view(today)
    }

    /// Close the roster. Whoever is still waiting is dropped; the queue
    /// does not carry over to the next cycle.
    pub fn close_cycle(&mut self, today: NaiveDate) -> String {
        self.state.is_open = false;
        if !self.state.wait_queue.is_empty() {
            log::info!("roster closed, dropping {} waiting players", self.state.wait_queue.len());
        }
        self.state.wait_queue.clear();

        self.persist();
        self.view(today)
    }

    /// Shuffle the full main roster into 3 teams of 5 and render them.
    /// Re-rolls on every call.
    pub fn draw_teams(&self) -> Result<String, RosterError> {
        let draw = self.draw_teams_with_rng(&mut rand::thread_rng())?;
        Ok(self.presenter.render_teams(&draw))
    }

    /// Draw with a caller-supplied RNG. Seeded RNGs make the deal
    /// reproducible in tests.
    pub fn draw_teams_with_rng<R: Rng>(&self, rng: &mut R) -> Result<TeamDraw, RosterError> {
        TeamDraw::draw(&self.state.main, rng)
    }

    /// Rendered cash report for one cycle date.
    pub fn cash_report(&self, date: NaiveDate) -> String {
        let records: Vec<&PaymentRecord> = self.state.ledger.for_date(date).collect();
        self.presenter.render_cash_report(date, &records)
    }

    fn insert(&mut self, name: &str, as_goalkeeper: bool) -> Result<(), RosterError> {
        if as_goalkeeper {
            if self.state.goalkeepers.contains(name) {
                return Err(RosterError::DuplicateEntry { name: name.to_string() });
            }
            let seat =
                self.state.goalkeepers.first_empty().ok_or(RosterError::CapacityExceeded)?;
            self.state.goalkeepers.set(seat, name.to_string());
        } else {
            if self.state.in_field_pool(name) {
                return Err(RosterError::DuplicateEntry { name: name.to_string() });
            }
            match self.state.main.first_empty() {
                Some(seat) => self.state.main.set(seat, name.to_string()),
                None => self.state.wait_queue.push_back(name.to_string()),
            }
        }
        Ok(())
    }

    fn promote(&mut self, seat: usize) {
        if let Some(promoted) = self.state.promote_into(seat) {
            log::info!("promoted {} from the wait queue into seat {}", promoted, seat + 1);
        }
    }

    fn seat_index(position: usize, capacity: usize) -> Result<usize, RosterError> {
        if position < 1 || position > capacity {
            return Err(RosterError::InvalidPosition { position, max: capacity });
        }
        Ok(position - 1)
    }

    /// Push the current state to the store. Failures are logged and
    /// swallowed: the reply still goes out and the state stays mutated,
    /// so store and memory can diverge until the next successful save.
    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.state.to_snapshot()) {
            log::warn!("failed to save roster snapshot: {}", err);
        }
    }
}
