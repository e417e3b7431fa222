use rand::Rng;
use std::collections::VecDeque;

/// Supplier of the uniform integer draws the scorer and detector make.
///
/// Every `rand::Rng` is a draw source; tests hand in [`ScriptedDraws`] instead so the
/// flood boost and rebalance branches can be pinned.
pub trait DrawSource {
    /// Uniform integer in `low..=high`.
    fn draw(&mut self, low: i32, high: i32) -> i32;
}

impl<R: Rng + ?Sized> DrawSource for R {
    fn draw(&mut self, low: i32, high: i32) -> i32 {
        self.gen_range(low..=high)
    }
}

/// Replays a fixed sequence of draws. Values outside the requested range are clamped
/// into it, and an exhausted script answers with `low`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    queue: VecDeque<i32>,
    requests: Vec<(i32, i32)>,
}

impl ScriptedDraws {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            queue: values.into_iter().collect(),
            requests: Vec::new(),
        }
    }

    /// Ranges requested so far, in call order.
    pub fn requests(&self) -> &[(i32, i32)] {
        &self.requests
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DrawSource for ScriptedDraws {
    fn draw(&mut self, low: i32, high: i32) -> i32 {
        self.requests.push((low, high));
        match self.queue.pop_front() {
            Some(value) => value.clamp(low, high),
            None => low,
        }
    }
}
