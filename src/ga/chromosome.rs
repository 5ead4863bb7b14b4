//! Placement-list chromosome.
//!
//! # Encoding
//!
//! A chromosome is a flat list of [`Placement`]s, one per (slot, active task)
//! pair that has at least one available worker. Genes carry index triples, so
//! operators can only recombine slots and tasks already present in the grid.
//!
//! # Operators
//!
//! - Midpoint crossover: `p1[..mid] ++ p2[mid..]`
//! - Task-swap mutation: exchange the task of two random genes

use rand::prelude::IndexedRandom;
use rand::Rng;
use u_metaheur::ga::{Fitness, Individual};

use crate::index::{Placement, ProblemIndex};

/// Candidate assignment set for the GA.
///
/// Lower fitness = better (minimization convention). Fitness is the
/// negated overall score, so a perfect assignment sits at `-1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentChromosome {
    /// Genes.
    pub placements: Vec<Placement>,
    /// Negated overall score; `INFINITY` until evaluated.
    pub fitness: f64,
}

impl Individual for AssignmentChromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl AssignmentChromosome {
    /// Wraps an existing placement list (unevaluated).
    pub fn from_placements(placements: Vec<Placement>) -> Self {
        Self {
            placements,
            fitness: f64::worst(),
        }
    }

    /// Overall score this chromosome was evaluated to.
    #[inline]
    pub fn overall(&self) -> f64 {
        -self.fitness
    }

    /// Creates a random chromosome.
    ///
    /// For every slot (chronological) and every active task, picks one
    /// random worker available in that slot. Slots nobody can work are
    /// left empty.
    pub fn random<R: Rng>(index: &ProblemIndex<'_>, rng: &mut R) -> Self {
        let mut placements = Vec::new();
        for &slot in index.slots_in_order() {
            let available: Vec<usize> = index.available_workers(slot).collect();
            if available.is_empty() {
                continue;
            }
            for &task in index.active_tasks() {
                if let Some(&worker) = available.choose(rng) {
                    placements.push(Placement::new(slot, worker, task));
                }
            }
        }
        Self::from_placements(placements)
    }

    /// Whether the fitness has been computed.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Number of genes.
    #[inline]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the chromosome holds no genes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Whether every gene references slots, workers and tasks of the grid.
    pub fn is_valid(&self, index: &ProblemIndex<'_>) -> bool {
        self.placements.iter().all(|p| {
            p.slot < index.slot_count()
                && p.worker < index.worker_count()
                && p.task < index.task_count()
        })
    }
}

/// Single-point crossover at the midpoint of the shorter parent.
///
/// The child takes the head of `p1` and the tail of `p2`.
pub fn midpoint_crossover(
    p1: &AssignmentChromosome,
    p2: &AssignmentChromosome,
) -> AssignmentChromosome {
    let mid = p1.len().min(p2.len()) / 2;
    let mut placements = Vec::with_capacity(mid + p2.len().saturating_sub(mid));
    placements.extend_from_slice(&p1.placements[..mid]);
    placements.extend_from_slice(&p2.placements[mid..]);
    AssignmentChromosome::from_placements(placements)
}

/// Swaps the task of two random genes.
pub fn task_swap_mutation<R: Rng>(chromosome: &mut AssignmentChromosome, rng: &mut R) {
    let len = chromosome.placements.len();
    if len < 2 {
        return;
    }
    let i = rng.random_range(0..len);
    let j = rng.random_range(0..len);
    let task_i = chromosome.placements[i].task;
    chromosome.placements[i].task = chromosome.placements[j].task;
    chromosome.placements[j].task = task_i;
    chromosome.fitness = f64::worst();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeatureToggles;
    use crate::models::{Grid, Task, TimeSlot, WorkerAvailability};
    use chrono::{NaiveDate, NaiveTime};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_grid() -> Grid {
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        Grid::new(date, "d")
            .with_time_slots(TimeSlot::sequence(
                "S",
                date,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                30,
                4,
            ))
            .with_worker(WorkerAvailability::new("E1"))
            .with_worker(WorkerAvailability::new("E2").with_unavailable_slot("S2"))
            .with_worker(WorkerAvailability::new("E3"))
            .with_task(Task::new("T1"))
            .with_task(Task::new("T2").with_active(false))
            .with_task(Task::new("T3"))
    }

    #[test]
    fn test_random_chromosome() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = AssignmentChromosome::random(&index, &mut rng);

        // 4 slots × 2 active tasks
        assert_eq!(ch.len(), 8);
        assert!(ch.is_valid(&index));
        assert!(!ch.is_evaluated());
        assert!(ch.placements.iter().all(|p| p.task != 1));
        assert!(ch.placements.iter().all(|p| index.is_available(p.worker, p.slot)));
    }

    #[test]
    fn test_random_chromosome_without_workers() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let grid = Grid::new(date, "d")
            .with_time_slots(TimeSlot::sequence(
                "S",
                date,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                30,
                2,
            ))
            .with_task(Task::new("T1"));
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let mut rng = SmallRng::seed_from_u64(42);
        assert!(AssignmentChromosome::random(&index, &mut rng).is_empty());
    }

    #[test]
    fn test_midpoint_crossover() {
        let p1 = AssignmentChromosome::from_placements(vec![
            Placement::new(0, 0, 0),
            Placement::new(1, 0, 0),
            Placement::new(2, 0, 0),
            Placement::new(3, 0, 0),
        ]);
        let p2 = AssignmentChromosome::from_placements(vec![
            Placement::new(0, 1, 2),
            Placement::new(1, 1, 2),
            Placement::new(2, 1, 2),
            Placement::new(3, 1, 2),
            Placement::new(3, 2, 2),
        ]);

        let child = midpoint_crossover(&p1, &p2);
        assert_eq!(
            child.placements,
            vec![
                Placement::new(0, 0, 0),
                Placement::new(1, 0, 0),
                Placement::new(2, 1, 2),
                Placement::new(3, 1, 2),
                Placement::new(3, 2, 2),
            ]
        );
        assert!(!child.is_evaluated());
    }

    #[test]
    fn test_crossover_with_empty_parent() {
        let empty = AssignmentChromosome::from_placements(Vec::new());
        let full = AssignmentChromosome::from_placements(vec![Placement::new(0, 0, 0)]);
        assert_eq!(midpoint_crossover(&empty, &full).placements, full.placements);
        assert!(midpoint_crossover(&full, &empty).is_empty());
    }

    #[test]
    fn test_task_swap_mutation_preserves_catalog() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = AssignmentChromosome::random(&index, &mut rng);

        let mut tasks_before: Vec<usize> = ch.placements.iter().map(|p| p.task).collect();
        let slots_before: Vec<usize> = ch.placements.iter().map(|p| p.slot).collect();
        for _ in 0..100 {
            task_swap_mutation(&mut ch, &mut rng);
        }
        let mut tasks_after: Vec<usize> = ch.placements.iter().map(|p| p.task).collect();
        let slots_after: Vec<usize> = ch.placements.iter().map(|p| p.slot).collect();

        tasks_before.sort();
        tasks_after.sort();
        assert_eq!(tasks_before, tasks_after);
        assert_eq!(slots_before, slots_after);
        assert!(ch.is_valid(&index));
    }

    #[test]
    fn test_mutation_on_single_gene_is_noop() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = AssignmentChromosome::from_placements(vec![Placement::new(0, 0, 0)]);
        ch.set_fitness(-0.5);
        task_swap_mutation(&mut ch, &mut rng);
        assert_eq!(ch.placements, vec![Placement::new(0, 0, 0)]);
        assert!((ch.overall() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_mutation_clears_fitness() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = AssignmentChromosome::from_placements(vec![
            Placement::new(0, 0, 0),
            Placement::new(1, 0, 1),
        ]);
        ch.set_fitness(-0.8);
        assert!(ch.is_evaluated());
        task_swap_mutation(&mut ch, &mut rng);
        assert!(!ch.is_evaluated());
        assert_eq!(ch.fitness(), f64::INFINITY);
    }
}
