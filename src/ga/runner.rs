//! Generational GA loop.
//!
//! Breeding, evaluation and parent selection come from `u-metaheur`
//! ([`GaProblem`], [`Selection`]). The loop itself stays here because
//! `u_metaheur::ga::GaRunner` has no way to seed the initial population,
//! stops on relative best-fitness stagnation rather than on the variance of
//! the top individuals, and takes a millisecond budget instead of a deadline
//! shared with earlier phases.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, warn};
use u_metaheur::ga::{GaProblem, Individual, Selection};

use super::chromosome::AssignmentChromosome;
use super::problem::AssignmentProblem;
use crate::evaluation::Evaluator;
use crate::index::Placement;
use crate::models::ObjectiveScores;

/// Generation after which the convergence check runs.
pub const CONVERGENCE_CHECK_AFTER: usize = 10;
/// Number of top individuals whose score variance decides convergence.
pub const CONVERGENCE_SAMPLE: usize = 5;

/// GA parameters.
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generation budget.
    pub max_generations: usize,
    /// Per-child mutation probability.
    pub mutation_rate: f64,
    /// Top-5 variance below which the run stops.
    pub convergence_threshold: f64,
    /// Share of the population carried over unchanged.
    pub elite_ratio: f64,
    /// Parent selection; tournament of 3 by default.
    pub selection: Selection,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Evaluate fitness with rayon.
    pub parallel: bool,
    /// Wall-clock cut-off.
    pub deadline: Option<Instant>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 1000,
            mutation_rate: 0.1,
            convergence_threshold: 0.001,
            elite_ratio: 0.2,
            selection: Selection::Tournament(3),
            seed: None,
            parallel: true,
            deadline: None,
        }
    }
}

impl GaConfig {
    /// Sets the number of individuals per generation.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the per-child mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the top-5 variance that counts as converged.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Sets the elite share.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio;
        self
    }

    /// Sets the parent selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables rayon fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the wall-clock cut-off.
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Number of elites kept per generation (at least 1).
    pub fn elite_count(&self) -> usize {
        let n = (self.population_size as f64 * self.elite_ratio).round() as usize;
        n.clamp(1, self.population_size.max(1))
    }
}

/// GA outcome.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best individual ever evaluated.
    pub best: Vec<Placement>,
    /// Scores of `best`.
    pub scores: ObjectiveScores,
    /// Generations evaluated.
    pub generations: usize,
    /// Stopped on the variance criterion.
    pub converged: bool,
    /// Stopped on the deadline.
    pub timed_out: bool,
}

/// Runs the GA over one evaluator.
pub struct GaRunner;

impl GaRunner {
    /// Evolves a population and returns the best individual found.
    ///
    /// `seeds` enter the initial population first (truncated to the
    /// population size); the remainder comes from
    /// [`GaProblem::create_individual`]. Generation 0 is always evaluated,
    /// so a deadline that has already passed still yields the best initial
    /// individual.
    pub fn run(
        evaluator: &Evaluator<'_, '_>,
        config: &GaConfig,
        seeds: Vec<Vec<Placement>>,
    ) -> GaResult {
        let problem = AssignmentProblem::new(evaluator);
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let size = config.population_size.max(1);
        let elites = config.elite_count();

        let mut population: Vec<AssignmentChromosome> = seeds
            .into_iter()
            .take(size)
            .map(AssignmentChromosome::from_placements)
            .collect();
        while population.len() < size {
            population.push(problem.create_individual(&mut rng));
        }

        let mut best: Option<AssignmentChromosome> = None;
        let mut generations = 0;
        let mut converged = false;
        let mut timed_out = false;

        for generation in 0..config.max_generations.max(1) {
            if generation > 0 && config.deadline.is_some_and(|d| Instant::now() >= d) {
                warn!(generation, "GA deadline reached");
                timed_out = true;
                break;
            }

            Self::evaluate(&problem, &mut population, config.parallel);
            population.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
            generations = generation + 1;

            if best.as_ref().map_or(true, |b| population[0].fitness() < b.fitness()) {
                best = Some(population[0].clone());
            }

            let variance = top_variance(&population, CONVERGENCE_SAMPLE);
            debug!(
                generation,
                best = population[0].overall(),
                variance,
                "GA generation evaluated"
            );

            if generations > CONVERGENCE_CHECK_AFTER && variance < config.convergence_threshold {
                converged = true;
                break;
            }
            if generations == config.max_generations {
                break;
            }

            let mut next: Vec<AssignmentChromosome> = population[..elites.min(population.len())].to_vec();
            while next.len() < size {
                let p1 = config.selection.select(&population, &mut rng);
                let p2 = config.selection.select(&population, &mut rng);
                for mut child in problem.crossover(&population[p1], &population[p2], &mut rng) {
                    if next.len() >= size {
                        break;
                    }
                    if rng.random_bool(config.mutation_rate.clamp(0.0, 1.0)) {
                        problem.mutate(&mut child, &mut rng);
                    }
                    next.push(child);
                }
            }
            population = next;
        }

        let best = best.map(|b| b.placements).unwrap_or_default();
        let scores = evaluator.score(&best);
        GaResult {
            best,
            scores,
            generations,
            converged,
            timed_out,
        }
    }

    /// Scores every unevaluated individual. Elites keep their fitness.
    fn evaluate(
        problem: &AssignmentProblem<'_, '_, '_>,
        population: &mut [AssignmentChromosome],
        parallel: bool,
    ) {
        if parallel {
            population
                .par_iter_mut()
                .filter(|c| !c.is_evaluated())
                .for_each(|c| {
                    let fitness = problem.evaluate(c);
                    c.set_fitness(fitness);
                });
        } else {
            population
                .iter_mut()
                .filter(|c| !c.is_evaluated())
                .for_each(|c| {
                    let fitness = problem.evaluate(c);
                    c.set_fitness(fitness);
                });
        }
    }
}

/// Population variance of the top `n` fitness values (population sorted best first).
fn top_variance(population: &[AssignmentChromosome], n: usize) -> f64 {
    let top: Vec<f64> = population.iter().take(n).map(|c| c.fitness()).collect();
    if top.is_empty() {
        return 0.0;
    }
    let mean = top.iter().sum::<f64>() / top.len() as f64;
    top.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / top.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeatureToggles, ObjectiveWeights};
    use crate::index::ProblemIndex;
    use crate::models::{Grid, SkillRequirement, Task, TimeSlot, WorkerAvailability, WorkerSkill};
    use chrono::{NaiveDate, NaiveTime};
    use std::time::Duration;

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
            .with_worker(WorkerAvailability::new("E1").with_skill(WorkerSkill::new("weld", 5, 1.0)))
            .with_worker(WorkerAvailability::new("E2").with_skill(WorkerSkill::new("paint", 4, 0.9)))
            .with_worker(WorkerAvailability::new("E3").with_skill(WorkerSkill::new("weld", 1, 0.5)))
            .with_task(Task::new("T1").with_skill(SkillRequirement::new("weld", 3, 1.0)))
            .with_task(Task::new("T2").with_skill(SkillRequirement::new("paint", 2, 1.0)))
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(12)
            .with_max_generations(30)
            .with_seed(Some(42))
            .with_parallel(false)
    }

    #[test]
    fn test_elite_count() {
        assert_eq!(GaConfig::default().elite_count(), 10);
        assert_eq!(GaConfig::default().with_population_size(2).elite_count(), 1);
        assert_eq!(GaConfig::default().with_population_size(7).elite_count(), 1);
    }

    #[test]
    fn test_top_variance() {
        let pop: Vec<AssignmentChromosome> = [-0.9, -0.7, -0.5]
            .iter()
            .map(|&f| AssignmentChromosome {
                placements: Vec::new(),
                fitness: f,
            })
            .collect();
        // mean 0.7, deviations ±0.2
        assert!((top_variance(&pop, 5) - 0.08 / 3.0).abs() < 1e-10);
        assert!((top_variance(&pop, 1) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_default_selection_is_tournament_of_three() {
        assert_eq!(GaConfig::default().selection, Selection::Tournament(3));
    }

    #[test]
    fn test_ga_finds_valid_solution() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());

        let result = GaRunner::run(&evaluator, &config(), Vec::new());
        assert!(result.generations >= 1 && result.generations <= 30);
        assert!(!result.best.is_empty());
        assert!(result.best.iter().all(|p| p.slot < 4 && p.task < 2 && p.worker < 3));
        assert!((result.scores.overall - evaluator.overall(&result.best)).abs() < 1e-10);
        assert!(!result.timed_out);
    }

    #[test]
    fn test_ga_never_worse_than_seed() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());

        let seed: Vec<Placement> = (0..4)
            .flat_map(|s| [Placement::new(s, 0, 0), Placement::new(s, 1, 1)])
            .collect();
        let seed_score = evaluator.overall(&seed);

        let result = GaRunner::run(&evaluator, &config(), vec![seed]);
        assert!(result.scores.overall >= seed_score - 1e-12);
    }

    #[test]
    fn test_ga_seeded_is_reproducible() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());

        let a = GaRunner::run(&evaluator, &config(), Vec::new());
        let b = GaRunner::run(&evaluator, &config(), Vec::new());
        assert_eq!(a.best, b.best);
        assert_eq!(a.generations, b.generations);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());

        let seq = GaRunner::run(&evaluator, &config(), Vec::new());
        let par = GaRunner::run(&evaluator, &config().with_parallel(true), Vec::new());
        assert_eq!(seq.best, par.best);
    }

    #[test]
    fn test_ga_converges_on_uniform_population() {
        // a single worker and task leaves one possible individual
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let grid = Grid::new(date, "d")
            .with_time_slots(vec![TimeSlot::new("S1", date, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30)])
            .with_worker(WorkerAvailability::new("E1"))
            .with_task(Task::new("T1"));
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());

        let result = GaRunner::run(&evaluator, &config().with_max_generations(100), Vec::new());
        assert!(result.converged);
        assert_eq!(result.generations, CONVERGENCE_CHECK_AFTER + 1);
    }

    #[test]
    fn test_ga_expired_deadline_returns_initial_best() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());

        let past = Instant::now() - Duration::from_millis(1);
        let result = GaRunner::run(&evaluator, &config().with_deadline(Some(past)), Vec::new());
        assert!(result.timed_out);
        assert_eq!(result.generations, 1);
        assert!(!result.best.is_empty());
    }
}
