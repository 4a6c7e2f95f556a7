use chrono::NaiveDate;
use thiserror::Error;

use crate::roster::PaymentMethod;

/// Every way a roster operation can refuse a request.
///
/// `Display` is the exact reply text sent back to the group chat, so the
/// messages stay in the group's language. None of these abort processing;
/// the caller forwards them as ordinary replies.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("O jogador \"{name}\" já está registrado em uma das listas.")]
    DuplicateEntry { name: String },

    #[error("Não há espaço disponível para novos goleiros.")]
    CapacityExceeded,

    #[error("Jogador não encontrado na lista.")]
    NotFound { name: String },

    #[error("Posição inválida. Escolha uma posição entre 1 e {max}.")]
    InvalidPosition { position: usize, max: usize },

    #[error("Não há jogador na posição {position}.")]
    EmptySlot { position: usize },

    #[error("Tipo de pagamento inválido: \"{input}\". Use pix, dinheiro ou cartao.")]
    InvalidPaymentMethod { input: String },

    #[error("Pagamento de \"{name}\" já registrado em {} ({method}).", .date.format("%d/%m/%Y"))]
    DuplicatePayment { name: String, method: PaymentMethod, date: NaiveDate },

    #[error("Não há jogadores suficientes na lista principal para formar {teams} times de {size} jogadores.")]
    InsufficientPlayers { occupied: usize, teams: usize, size: usize },

    #[error("Lista fechada. Entre em contato com um administrador do grupo.")]
    RosterClosed,
}
