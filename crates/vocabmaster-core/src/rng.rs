// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The random source behind question generation. Sessions take it by
//! `&mut`, so a fixed seed makes a whole game reproducible.

/// A minimal, zero-dependency, completely insecure PRNG.
#[derive(Clone, Debug)]
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    /// Generate a random number in the range [0, max). `max` must be non-zero.
    pub fn generate(&mut self, max: usize) -> usize {
        debug_assert!(max > 0);
        (self.next_u32() as usize) % max
    }

    /// A fair coin.
    pub fn flip(&mut self) -> bool {
        self.next_u32() >> 31 == 1
    }

    /// Pick one element uniformly, or `None` if the slice is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.generate(items.len()))
        }
    }

    /// Pick up to `count` distinct positions of `items` without replacement.
    pub fn sample<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        let mut indices: Vec<usize> = (0..items.len()).collect();
        let take = count.min(indices.len());
        // Partial Fisher-Yates: the first `take` slots end up sampled.
        for i in 0..take {
            let j = i + self.generate(indices.len() - i);
            indices.swap(i, j);
        }
        indices
            .into_iter()
            .take(take)
            .map(|i| items[i].clone())
            .collect()
    }
}

pub fn shuffle<T>(v: Vec<T>, rng: &mut TinyRng) -> Vec<T> {
    let mut v = v;
    for i in (1..v.len()).rev() {
        let j = rng.generate(i + 1);
        v.swap(i, j);
    }
    v
}
