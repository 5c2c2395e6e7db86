//! Спусковой крючок: кнопка огня + fire interval таймер

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Default)]
pub struct FireTrigger {
    /// Кнопка огня зажата (для автоматического refire)
    pub fire_button_pressed: bool,
    /// Нажатие в этом кадре, ещё не обработанное
    pub fire_requested: bool,
    /// Fire interval (`Some` пока FireTimerInProgress)
    pub fire_timer: Option<Timer>,
}

impl FireTrigger {
    pub fn press(&mut self) {
        self.fire_button_pressed = true;
        self.fire_requested = true;
    }

    pub fn release(&mut self) {
        self.fire_button_pressed = false;
    }

    /// Забирает нажатие (одно нажатие = одна попытка выстрела)
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.fire_requested)
    }

    pub fn start_fire_timer(&mut self, interval: f32) {
        self.fire_timer = Some(Timer::from_seconds(interval, TimerMode::Once));
    }
}
