//! Command dispatch: the only place that knows command words.
//!
//! Each input line is `<name>: <message>`, mirroring the sender identity
//! plus body pair a chat transport would deliver, or a bare `/command`
//! issued in admin context. Messages that are not commands are ignored,
//! except the one-word payment-method follow-up to a pending `/pg`.

use chrono::{DateTime, NaiveDate, Utc};

use pelada_core::{
    PaymentMethod, PendingPayments, RosterEngine, RosterError, RosterStore, MAIN_CAPACITY,
};

const DATE_FORMAT: &str = "%d/%m/%Y";

pub struct Dispatcher<S: RosterStore> {
    engine: RosterEngine<S>,
    pending: PendingPayments,
    seeds: Vec<String>,
}

impl<S: RosterStore> Dispatcher<S> {
    pub fn new(engine: RosterEngine<S>, pending: PendingPayments, seeds: Vec<String>) -> Self {
        Self { engine, pending, seeds }
    }

    pub fn engine(&self) -> &RosterEngine<S> {
        &self.engine
    }

    /// Handle one inbound line. `None` means no reply (the message was
    /// not addressed to the bot).
    pub fn handle_line(
        &mut self,
        line: &str,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Option<String> {
        let (sender, body) = split_sender(line);
        let body = body.trim();
        if body.is_empty() {
            return None;
        }

        let mut words = body.split_whitespace();
        let command = words.next()?.to_lowercase();
        let args: Vec<&str> = words.collect();

        match command.as_str() {
            "/add" => reply(self.engine.add_participant(sender, false, today)),
            "/rm" => reply(self.engine.remove_participant(sender, false, today)),
            "/addgol" => reply(self.engine.add_participant(sender, true, today)),
            "/rmgol" => reply(self.engine.remove_participant(sender, true, today)),
            "/ver" => Some(self.engine.view(today)),
            "/addlista" => Some(self.engine.bulk_add(&parse_csv(&args), false, today)),
            "/addlistag" => Some(self.engine.bulk_add(&parse_csv(&args), true, today)),
            "/rmp" => match parse_position(&args) {
                Some(position) => reply(self.engine.remove_by_position(position, false, today)),
                None => Some("Posição não informada. *Exemplo: /rmp 1*".to_string()),
            },
            "/rmpgol" => match parse_position(&args) {
                Some(position) => reply(self.engine.remove_by_position(position, true, today)),
                None => Some("Posição não informada. *Exemplo: /rmpgol 1*".to_string()),
            },
            "/limpar" => Some(self.engine.reset_cycle(&[], today)),
            "/reiniciar" => {
                let seeds = self.seeds.clone();
                Some(self.engine.reset_cycle(&seeds, today))
            }
            "/sortear" => reply(self.engine.draw_teams()),
            "/abrir" => Some(self.engine.open_cycle(today)),
            "/fechar" => Some(self.engine.close_cycle(today)),
            "/pg" => self.handle_payment(sender, &args, today, now),
            "/caixa" => match args.first() {
                Some(arg) => match parse_date(arg) {
                    Some(date) => Some(self.engine.cash_report(date)),
                    None => Some(date_hint("/caixa 06/03/2025")),
                },
                None => Some(self.engine.cash_report(today)),
            },
            _ => self.handle_follow_up(sender, body, now),
        }
    }

    /// `/pg <pos> [date] [method]`. With the method present the payment is
    /// recorded at once; without it the request waits for a one-word
    /// follow-up from the same sender.
    fn handle_payment(
        &mut self,
        sender: &str,
        args: &[&str],
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Option<String> {
        let Some(position) = parse_position(args) else {
            return Some("Posição ou tipo de pagamento não informada. *Exemplo: /pg 1 pix*".to_string());
        };

        if let Err(err) = self.check_payment_seat(position) {
            return Some(err.to_string());
        }

        let mut rest = &args[1..];
        let date = match rest.first().and_then(|arg| parse_date(arg)) {
            Some(date) => {
                rest = &rest[1..];
                date
            }
            None => today,
        };

        match rest.first() {
            Some(word) => match PaymentMethod::parse(word) {
                Ok(method) => reply(self.engine.record_payment(position, method, date)),
                Err(err) => Some(err.to_string()),
            },
            None => {
                self.pending.register(sender, position, date, now);
                Some("Qual o tipo de pagamento? Responda pix, dinheiro ou cartao.".to_string())
            }
        }
    }

    /// A bare method word from a sender with a pending `/pg` completes the
    /// two-step flow. Anything else stays unanswered.
    fn handle_follow_up(
        &mut self,
        sender: &str,
        body: &str,
        now: DateTime<Utc>,
    ) -> Option<String> {
        let method = PaymentMethod::parse(body).ok()?;
        let entry = self.pending.take(sender, now)?;
        reply(self.engine.record_payment(entry.position, method, entry.date))
    }

    fn check_payment_seat(&self, position: usize) -> Result<(), RosterError> {
        if position < 1 || position > MAIN_CAPACITY {
            return Err(RosterError::InvalidPosition { position, max: MAIN_CAPACITY });
        }
        if self.engine.state().main.is_empty_at(position - 1) {
            return Err(RosterError::EmptySlot { position });
        }
        Ok(())
    }
}

fn split_sender(line: &str) -> (&str, &str) {
    if line.trim_start().starts_with('/') {
        return ("admin", line);
    }
    match line.split_once(':') {
        Some((sender, body)) => (sender.trim(), body),
        None => ("admin", line),
    }
}

fn parse_position(args: &[&str]) -> Option<usize> {
    args.first()?.parse().ok()
}

fn parse_date(arg: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(arg, DATE_FORMAT).ok()
}

fn parse_csv(args: &[&str]) -> Vec<String> {
    args.join(" ")
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn date_hint(example: &str) -> String {
    format!("Data inválida. Use dia/mês/ano. *Exemplo: {}*", example)
}

fn reply(result: Result<String, RosterError>) -> Option<String> {
    Some(match result {
        Ok(text) => text,
        Err(err) => err.to_string(),
    })
}
