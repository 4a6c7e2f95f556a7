use chrono::NaiveDate;

use crate::roster::draw::TeamDraw;
use crate::roster::payment::{PaymentMethod, PaymentRecord};
use crate::roster::RosterState;

/// Renders roster state into the reply text sent back to the group.
///
/// Section order is fixed: goalkeepers, main roster, then either the wait
/// queue (while the roster is open) or the confirmed-payments summary
/// (while closed). Rendering never fails; empty seats print as blank
/// lines so positions stay visible for the position-based commands.
#[derive(Debug, Clone)]
pub struct Presenter {
    title: String,
    schedule: String,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new("Lista Pelada", "Quinta 21:40")
    }
}

impl Presenter {
    pub fn new(title: impl Into<String>, schedule: impl Into<String>) -> Self {
        Self { title: title.into(), schedule: schedule.into() }
    }

    /// Full roster view. Paid participants are marked with the payment
    /// icon recorded in the ledger for `today`.
    pub fn render(&self, state: &RosterState, today: NaiveDate) -> String {
        let mut message = format!("\n{}\n{}\n", self.title, self.schedule);

        message.push_str("\nGoleiros:\n");
        for (index, seat) in state.goalkeepers.iter().enumerate() {
            message.push_str(&format!("{} - 🥅 {}\n", index + 1, seat.unwrap_or("")));
        }

        message.push_str("\nJogadores:\n");
        for (index, seat) in state.main.iter().enumerate() {
            match seat {
                Some(name) => match state.ledger.find(name, today) {
                    Some(record) => message.push_str(&format!(
                        "{} - {} => {}\n",
                        index + 1,
                        name,
                        record.method.icon()
                    )),
                    None => message.push_str(&format!("{} - {}\n", index + 1, name)),
                },
                None => message.push_str(&format!("{} - \n", index + 1)),
            }
        }

        if state.is_open {
            if state.wait_queue.is_empty() {
                message.push_str("\nLista de espera vazia\n");
            } else {
                message.push_str("\nLista de espera\n");
                for (index, name) in state.wait_queue.iter().enumerate() {
                    message.push_str(&format!("{} - {}\n", index + 1, name));
                }
            }
        } else {
            message.push_str(&self.render_paid_summary(state, today));
        }

        message
    }

    /// Drawn teams, one block per team.
    pub fn render_teams(&self, draw: &TeamDraw) -> String {
        let mut message = String::from("\n*Times Sorteados:*\n");
        for (index, team) in draw.teams().iter().enumerate() {
            message.push_str(&format!("\n*Time {}:*\n", index + 1));
            for player in team {
                message.push_str(&format!("- {}\n", player));
            }
        }
        message
    }

    /// Cash report for one cycle date: every confirmed payment plus a
    /// per-method breakdown.
    pub fn render_cash_report(&self, date: NaiveDate, records: &[&PaymentRecord]) -> String {
        let date_text = date.format("%d/%m/%Y");

        if records.is_empty() {
            return format!("\nNenhum pagamento registrado em {}.\n", date_text);
        }

        let mut message = format!("\n*Caixa {}*\n", date_text);
        for (index, record) in records.iter().enumerate() {
            message.push_str(&format!(
                "{} - {} {}\n",
                index + 1,
                record.name,
                record.method.icon()
            ));
        }

        let count_of = |method: PaymentMethod| {
            records.iter().filter(|record| record.method == method).count()
        };
        message.push_str(&format!(
            "\npix: {} | dinheiro: {} | cartao: {}\nTotal: {} pagamentos\n",
            count_of(PaymentMethod::Pix),
            count_of(PaymentMethod::Cash),
            count_of(PaymentMethod::Card),
            records.len()
        ));

        message
    }

    fn render_paid_summary(&self, state: &RosterState, today: NaiveDate) -> String {
        let paid: Vec<&PaymentRecord> = state.ledger.for_date(today).collect();

        if paid.is_empty() {
            return String::from("\nNenhum pagamento confirmado\n");
        }

        let mut section = String::from("\nPagamentos confirmados:\n");
        for record in paid {
            section.push_str(&format!("- {} {}\n", record.name, record.method.icon()));
        }
        section
    }
}
