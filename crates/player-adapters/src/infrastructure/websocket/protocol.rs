//! Connection state encoding for lock-free sharing between the handle and
//! the socket task.

use tictac_player_ports::outbound::ConnectionState;

pub fn state_to_u8(state: ConnectionState) -> u8 {
    match state {
        ConnectionState::Connecting => 0,
        ConnectionState::Open => 1,
        ConnectionState::Closed => 2,
    }
}

/// Unknown values decode as `Closed`.
pub fn u8_to_state(v: u8) -> ConnectionState {
    match v {
        0 => ConnectionState::Connecting,
        1 => ConnectionState::Open,
        _ => ConnectionState::Closed,
    }
}
