//! The dual-survivor forward sweep and the serial list-Viterbi enumerator
//! built on top of it.
//!
//! The forward sweep is an ordinary Viterbi recursion that additionally
//! remembers, at every `(state, stage)` cell, the best *suboptimal*
//! predecessor alongside the optimal one. The enumerator then walks a
//! min-heap of "detours" — substitutions of a cell's suboptimal predecessor
//! for its optimal one — to produce the 1st, 2nd, 3rd, … lowest-metric
//! trellis paths without ever re-running the forward sweep.

use std::collections::HashSet;

use crate::error::{DecodeError, Result};
use crate::heap::{Detour, DetourHeap, NO_ORIGIN};
use crate::trellis::Trellis;

/// One cell of the dual-survivor grid, indexed by `(state, stage)`.
#[derive(Clone, Copy, Debug)]
struct Cell {
    optimal_father: Option<usize>,
    suboptimal_father: Option<usize>,
    path_metric: f64,
    suboptimal_path_metric: f64,
    initialized: bool,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            optimal_father: None,
            suboptimal_father: None,
            path_metric: f64::INFINITY,
            suboptimal_path_metric: f64::INFINITY,
            initialized: false,
        }
    }
}

/// How the enumerator's main loop decides to give up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StoppingRule {
    /// Stop once `list_size_limit` candidates have been inspected, however
    /// large their metric.
    MaxList,
    /// Stop as soon as a popped detour's projected metric exceeds the given
    /// threshold, even if `list_size_limit` hasn't been reached.
    MaxMetric(f64),
}

/// Result of a `decode` call.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageInformation {
    /// Recovered information+CRC bits. Empty when `list_size_exceeded`.
    pub message: Vec<u8>,
    /// The winning state sequence, `path[0] == path[path.len() - 1]`.
    /// Empty when `list_size_exceeded`.
    pub path: Vec<usize>,
    /// Rank (1-based) at which the winner was found.
    pub list_size: usize,
    /// Count of tail-biting candidates inspected, including the winner.
    pub tb_list_size: usize,
    /// Final path metric of the winner.
    pub metric: f64,
    /// `true` if the loop exhausted its budget without finding a
    /// tail-biting, CRC-valid path.
    pub list_size_exceeded: bool,
}

fn squared_distance(received: f64, expected: i32) -> f64 {
    let diff = received - expected as f64;
    diff * diff
}

/// Build the `states x path_length` dual-survivor grid for `received`
/// against `trellis`, honoring `puncture` (received indices that carry no
/// information and so contribute zero branch metric).
fn build_grid(
    trellis: &Trellis,
    received: &[f64],
    puncture: &HashSet<usize>,
) -> Result<(Vec<Vec<Cell>>, usize)> {
    let n = trellis.n();

    if received.len() % n != 0 {
        return Err(DecodeError::MalformedInput(
            "received vector length must be a multiple of n",
        ));
    }
    if puncture.iter().any(|&idx| idx >= received.len()) {
        return Err(DecodeError::MalformedInput(
            "puncturing index out of bounds",
        ));
    }

    let path_length = received.len() / n + 1;
    let states = trellis.states();

    let mut grid = vec![vec![Cell::default(); path_length]; states];
    for s in 0..states {
        grid[s][0].path_metric = 0.0;
        grid[s][0].initialized = true;
    }

    for stage in 0..path_length - 1 {
        for s in 0..states {
            if !grid[s][stage].initialized {
                continue;
            }
            let stage_metric = grid[s][stage].path_metric;

            for f in 0..trellis.inputs() {
                let next = trellis.next_state(s, f);
                let out_bits = crate::bits::dec_to_binary(trellis.output(s, f), n);

                let mut branch_metric = 0.0;
                for (i, &bit) in out_bits.iter().enumerate() {
                    let idx = n * stage + i;
                    if puncture.contains(&idx) {
                        continue;
                    }
                    branch_metric += squared_distance(received[idx], crate::bits::bpsk(bit));
                }

                let cand = branch_metric + stage_metric;
                let cell = &mut grid[next][stage + 1];

                if !cell.initialized {
                    cell.path_metric = cand;
                    cell.optimal_father = Some(s);
                    cell.initialized = true;
                } else if cand < cell.path_metric {
                    cell.suboptimal_path_metric = cell.path_metric;
                    cell.suboptimal_father = cell.optimal_father;
                    cell.path_metric = cand;
                    cell.optimal_father = Some(s);
                } else {
                    cell.suboptimal_path_metric = cand;
                    cell.suboptimal_father = Some(s);
                }
            }
        }
    }

    Ok((grid, path_length))
}

/// Invert a trellis path to the information bits that produced it.
pub fn path_to_message(trellis: &Trellis, path: &[usize]) -> Vec<u8> {
    let mut message = Vec::with_capacity(trellis.k() * path.len().saturating_sub(1));

    for pair in path.windows(2) {
        let f = trellis
            .input_for_transition(pair[0], pair[1])
            .expect("enumerated path must be a legal trellis walk");
        message.extend(crate::bits::dec_to_binary(f as u32, trellis.k()));
    }

    message
}

/// Invert a trellis path to the (unpunctured) BPSK codeword it transmits.
pub fn path_to_codeword(trellis: &Trellis, path: &[usize]) -> Vec<i32> {
    let mut codeword = Vec::with_capacity(trellis.n() * path.len().saturating_sub(1));

    for pair in path.windows(2) {
        let f = trellis
            .input_for_transition(pair[0], pair[1])
            .expect("enumerated path must be a legal trellis walk");
        let out_bits = crate::bits::dec_to_binary(trellis.output(pair[0], f), trellis.n());
        codeword.extend(out_bits.into_iter().map(crate::bits::bpsk));
    }

    codeword
}

/// Decode `received` against `trellis`, returning the first candidate that
/// is both tail-biting (`path[0] == path[last]`) and CRC-valid, in
/// increasing order of path metric.
///
/// `list_size_limit` bounds the number of candidates inspected regardless
/// of `stopping_rule`; `stopping_rule` can additionally cut the search
/// short once the popped metric crosses a threshold.
pub fn decode(
    trellis: &Trellis,
    received: &[f64],
    puncturing_indices: &[usize],
    list_size_limit: usize,
    crc_width: usize,
    crc_poly: u32,
    stopping_rule: StoppingRule,
) -> Result<MessageInformation> {
    let puncture: HashSet<usize> = puncturing_indices.iter().copied().collect();
    let (grid, path_length) = build_grid(trellis, received, &puncture)?;

    let mut heap = DetourHeap::new();
    for s in 0..trellis.states() {
        heap.insert(Detour::seed(s, grid[s][path_length - 1].path_metric));
    }

    let mut previous_paths: Vec<Vec<usize>> = Vec::new();
    let mut rank = 0usize;
    let mut tb_list_size = 0usize;

    while rank < list_size_limit {
        let Some(detour) = heap.pop_min() else {
            break;
        };

        if let StoppingRule::MaxMetric(threshold) = stopping_rule {
            if detour.projected_metric > threshold {
                break;
            }
        }

        let mut path = vec![0usize; path_length];
        let mut stage;
        let mut current_state;
        let mut fwd;

        if detour.origin_path_index == NO_ORIGIN {
            current_state = detour.starting_state;
            stage = path_length - 1;
            fwd = 0.0;
        } else {
            path = previous_paths[detour.origin_path_index].clone();
            stage = detour.detour_stage;
            current_state = path[stage];

            let suboptimal_metric = grid[current_state][stage].suboptimal_path_metric;
            let suboptimal_father = grid[current_state][stage]
                .suboptimal_father
                .expect("detour was queued from a cell with a suboptimal father");
            let prev_metric = grid[suboptimal_father][stage - 1].path_metric;

            fwd = detour.forward_path_metric + (suboptimal_metric - prev_metric);
            current_state = suboptimal_father;
            stage -= 1;
        }
        path[stage] = current_state;

        while stage > 0 {
            let cell = grid[current_state][stage];

            if cell.suboptimal_father.is_some() {
                heap.insert(Detour {
                    starting_state: detour.starting_state,
                    origin_path_index: rank,
                    detour_stage: stage,
                    forward_path_metric: fwd,
                    projected_metric: fwd + cell.suboptimal_path_metric,
                });
            }

            let optimal_father = cell
                .optimal_father
                .expect("initialized cell always has an optimal father once stage > 0");
            let prev_metric = grid[optimal_father][stage - 1].path_metric;
            fwd += cell.path_metric - prev_metric;
            current_state = optimal_father;
            stage -= 1;
            path[stage] = current_state;
        }

        previous_paths.push(path.clone());

        let message = path_to_message(trellis, &path);
        let tail_biting = path[0] == path[path_length - 1];

        if tail_biting && crate::bits::crc_check(&message, crc_poly, crc_width) {
            log::debug!(
                "decode accepted: list_size={} tb_list_size={} metric={}",
                rank + 1,
                tb_list_size + 1,
                fwd
            );
            return Ok(MessageInformation {
                message,
                path,
                list_size: rank + 1,
                tb_list_size: tb_list_size + 1,
                metric: fwd,
                list_size_exceeded: false,
            });
        }

        rank += 1;
        if tail_biting {
            tb_list_size += 1;
        }
    }

    log::debug!("decode exhausted list budget after {} candidates", rank);
    Ok(MessageInformation {
        message: Vec::new(),
        path: Vec::new(),
        list_size: rank,
        tb_list_size,
        metric: f64::INFINITY,
        list_size_exceeded: true,
    })
}
