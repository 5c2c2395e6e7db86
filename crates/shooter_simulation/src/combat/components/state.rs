//! Combat state machine персонажа
//!
//! Все "монтаж доиграл" / "таймер истёк" приходят как `CombatTrigger`
//! и проходят через одну таблицу переходов (`CombatState::next`).

use bevy::prelude::*;

/// Боевое состояние контроллера (ровно одно)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum CombatState {
    #[default]
    Unoccupied,
    /// Выстрел сделан, ждём fire interval
    FireTimerInProgress,
    Reloading,
    /// Играет equip montage
    Equipping,
    /// Hit react
    Stunned,
}

/// Событие, завершающее занятое состояние
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum CombatTrigger {
    FireTimerElapsed,
    ReloadFinished,
    EquipFinished,
    StunEnded,
}

impl CombatState {
    /// Таблица переходов: `None` = триггер не относится к текущему состоянию
    pub fn next(self, trigger: CombatTrigger) -> Option<CombatState> {
        use CombatState::*;
        use CombatTrigger::*;

        match (self, trigger) {
            (FireTimerInProgress, FireTimerElapsed) => Some(Unoccupied),
            (Reloading, ReloadFinished) => Some(Unoccupied),
            (Equipping, EquipFinished) => Some(Unoccupied),
            (Stunned, StunEnded) => Some(Unoccupied),
            _ => None,
        }
    }

    /// Применить триггер; false если переход не существует
    pub fn apply(&mut self, trigger: CombatTrigger) -> bool {
        match self.next(trigger) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    pub fn can_fire(self) -> bool {
        self == CombatState::Unoccupied
    }

    pub fn can_reload(self) -> bool {
        self == CombatState::Unoccupied
    }

    pub fn can_exchange_items(self) -> bool {
        matches!(self, CombatState::Unoccupied | CombatState::Equipping)
    }

    pub fn can_aim(self) -> bool {
        !matches!(
            self,
            CombatState::Reloading | CombatState::Equipping | CombatState::Stunned
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_busy_state_has_one_exit() {
        let table = [
            (CombatState::FireTimerInProgress, CombatTrigger::FireTimerElapsed),
            (CombatState::Reloading, CombatTrigger::ReloadFinished),
            (CombatState::Equipping, CombatTrigger::EquipFinished),
            (CombatState::Stunned, CombatTrigger::StunEnded),
        ];

        for (state, exit) in table {
            assert_eq!(state.next(exit), Some(CombatState::Unoccupied));
            for (_, other) in table.iter().filter(|(_, trigger)| *trigger != exit) {
                assert_eq!(state.next(*other), None, "{:?} must ignore {:?}", state, other);
            }
        }
    }

    #[test]
    fn test_unoccupied_ignores_all_triggers() {
        let mut state = CombatState::Unoccupied;
        assert!(!state.apply(CombatTrigger::ReloadFinished));
        assert_eq!(state, CombatState::Unoccupied);
    }

    #[test]
    fn test_guards() {
        assert!(CombatState::Unoccupied.can_fire());
        assert!(!CombatState::FireTimerInProgress.can_fire());
        assert!(!CombatState::Reloading.can_reload());
        assert!(CombatState::Equipping.can_exchange_items());
        assert!(!CombatState::Stunned.can_exchange_items());
        assert!(CombatState::FireTimerInProgress.can_aim());
        assert!(!CombatState::Equipping.can_aim());
    }
}
