//! Random implementations.

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn roll_die(&self, sides: u8) -> u8 {
        use rand::Rng;
        rand::thread_rng().gen_range(1..=sides.max(1))
    }
}

/// Random that replays a fixed list of faces, then repeats the last one.
#[cfg(test)]
pub struct ScriptedRandom {
    faces: std::sync::Mutex<std::collections::VecDeque<u8>>,
    last: std::sync::atomic::AtomicU8,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: std::sync::Mutex::new(faces.into_iter().collect()),
            last: std::sync::atomic::AtomicU8::new(1),
        }
    }
}

#[cfg(test)]
impl RandomPort for ScriptedRandom {
    fn roll_die(&self, _sides: u8) -> u8 {
        use std::sync::atomic::Ordering;
        let next = self.faces.lock().ok().and_then(|mut faces| faces.pop_front());
        match next {
            Some(face) => {
                self.last.store(face, Ordering::SeqCst);
                face
            }
            None => self.last.load(Ordering::SeqCst),
        }
    }
}
