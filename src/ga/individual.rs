//! A candidate solution: one Gray-coded chromosome per dimension.

use super::gray;
use super::params::FunctionParams;
use crate::error::GaError;
use rand::Rng;
use std::fmt::Write as _;
use std::sync::Arc;

/// One member of the population.
///
/// The cached fitness is only meaningful after the owner recomputes it
/// from [`decode`](Self::decode). Crossover and mutation do not reset it;
/// call [`evaluate`](Self::evaluate) after changing the chromosomes.
///
/// Cloning copies the chromosomes and the fitness. The domain description
/// is shared, but it is immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    chromosomes: Vec<Vec<bool>>,
    fitness: f64,
    params: Arc<FunctionParams>,
}

impl Individual {
    /// Creates an individual whose bits are independently uniform.
    pub fn random<R: Rng>(params: Arc<FunctionParams>, rng: &mut R) -> Self {
        let chromosomes = params
            .bit_lengths()
            .iter()
            .map(|&len| (0..len).map(|_| rng.random_bool(0.5)).collect())
            .collect();
        Self {
            chromosomes,
            fitness: 0.0,
            params,
        }
    }

    /// Creates an individual from explicit chromosomes.
    ///
    /// # Errors
    /// [`GaError::DimensionMismatch`] if the number of chromosomes or any
    /// chromosome length differs from the domain's layout.
    pub fn from_chromosomes(
        params: Arc<FunctionParams>,
        chromosomes: Vec<Vec<bool>>,
    ) -> Result<Self, GaError> {
        if chromosomes.len() != params.dimensions() {
            return Err(GaError::DimensionMismatch {
                expected: params.dimensions(),
                actual: chromosomes.len(),
            });
        }
        for (chromosome, &len) in chromosomes.iter().zip(params.bit_lengths()) {
            if chromosome.len() != len {
                return Err(GaError::DimensionMismatch {
                    expected: len,
                    actual: chromosome.len(),
                });
            }
        }
        Ok(Self {
            chromosomes,
            fitness: 0.0,
            params,
        })
    }

    /// The domain this individual is encoded against.
    pub fn params(&self) -> &Arc<FunctionParams> {
        &self.params
    }

    /// All chromosomes, one per dimension.
    pub fn chromosomes(&self) -> &[Vec<bool>] {
        &self.chromosomes
    }

    /// The chromosome of one dimension.
    pub fn chromosome(&self, dimension: usize) -> Option<&[bool]> {
        self.chromosomes.get(dimension).map(Vec::as_slice)
    }

    /// Cached fitness.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Overwrites the cached fitness.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Decodes every chromosome into its real value.
    pub fn decode(&self) -> Vec<f64> {
        self.chromosomes
            .iter()
            .zip(self.params.intervals())
            .map(|(bits, interval)| gray::decode(bits, interval))
            .collect()
    }

    /// Recomputes and caches fitness with `fitness_fn` applied to the
    /// decoded point.
    pub fn evaluate<F: Fn(&[f64]) -> f64>(&mut self, fitness_fn: F) -> f64 {
        self.fitness = fitness_fn(&self.decode());
        self.fitness
    }

    /// Single-point crossover of one dimension.
    ///
    /// Bits `[0, cut_point)` come from `first`, bits `[cut_point, len)`
    /// from `second`. Other dimensions are untouched.
    ///
    /// # Errors
    /// [`GaError::CutPointOutOfRange`] if `cut_point > len` and
    /// [`GaError::DimensionMismatch`] if the dimension is missing or the
    /// parents' chromosome lengths differ from this one. Nothing is
    /// written on error.
    pub fn crossover(
        &mut self,
        first: &Individual,
        second: &Individual,
        cut_point: usize,
        dimension: usize,
    ) -> Result<(), GaError> {
        let dims = self.chromosomes.len();
        let target = self
            .chromosomes
            .get_mut(dimension)
            .ok_or(GaError::DimensionMismatch {
                expected: dims,
                actual: dimension + 1,
            })?;
        let length = target.len();
        let (head, tail) = match (first.chromosome(dimension), second.chromosome(dimension)) {
            (Some(a), Some(b)) if a.len() == length && b.len() == length => (a, b),
            (Some(a), Some(b)) => {
                let actual = if a.len() != length { a.len() } else { b.len() };
                return Err(GaError::DimensionMismatch {
                    expected: length,
                    actual,
                });
            }
            _ => {
                return Err(GaError::DimensionMismatch {
                    expected: dims,
                    actual: first.chromosomes.len().min(second.chromosomes.len()),
                })
            }
        };
        if cut_point > length {
            return Err(GaError::CutPointOutOfRange {
                dimension,
                cut_point,
                length,
            });
        }

        target[..cut_point].copy_from_slice(&head[..cut_point]);
        target[cut_point..].copy_from_slice(&tail[cut_point..]);
        Ok(())
    }

    /// Flips one bit. Returns `false` and changes nothing when the
    /// dimension or the bit index is out of range.
    pub fn mutate(&mut self, dimension: usize, bit_index: usize) -> bool {
        match self
            .chromosomes
            .get_mut(dimension)
            .and_then(|chromosome| chromosome.get_mut(bit_index))
        {
            Some(bit) => {
                *bit = !*bit;
                true
            }
            None => false,
        }
    }

    /// Chromosomes as `0`/`1` text, dimensions separated by spaces.
    pub fn chromosome_string(&self) -> String {
        let mut out = String::new();
        for (i, chromosome) in self.chromosomes.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            for &bit in chromosome {
                out.push(if bit { '1' } else { '0' });
            }
        }
        out
    }

    /// One line of the generation dump: bits, decoded values, fitness and
    /// raw objective value.
    pub fn log_line(&self, objective_value: f64) -> String {
        let mut line = format!("| {} |\t", self.chromosome_string());
        let values: Vec<String> = self.decode().iter().map(|x| format!("{x:.2}")).collect();
        let _ = write!(
            line,
            "{}\t{:.2}\t{:.2}",
            values.join(" "),
            self.fitness,
            objective_value
        );
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params_2d() -> Arc<FunctionParams> {
        Arc::new(FunctionParams::from_bounds(&[-4.0, -4.0], &[4.0, 4.0], &[0.001, 0.001]).unwrap())
    }

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_random_matches_layout() {
        let params = params_2d();
        let mut rng = StdRng::seed_from_u64(42);
        let ind = Individual::random(params.clone(), &mut rng);
        assert_eq!(ind.chromosomes().len(), 2);
        for (chromosome, &len) in ind.chromosomes().iter().zip(params.bit_lengths()) {
            assert_eq!(chromosome.len(), len);
        }
    }

    #[test]
    fn test_random_bits_are_mixed() {
        let params = Arc::new(FunctionParams::single(-5.0, 5.0, 1e-5).unwrap());
        let mut rng = StdRng::seed_from_u64(3);
        let ones: usize = (0..200)
            .map(|_| Individual::random(params.clone(), &mut rng))
            .map(|ind| ind.chromosomes()[0].iter().filter(|&&b| b).count())
            .sum();
        // 200 * 20 bits, expect about half set
        assert!((1600..2400).contains(&ones), "ones = {ones}");
    }

    #[test]
    fn test_from_chromosomes_checks_layout() {
        let params = Arc::new(FunctionParams::single(0.0, 10.0, 0.1).unwrap());
        assert!(Individual::from_chromosomes(params.clone(), vec![bits("0000000")]).is_ok());
        assert_eq!(
            Individual::from_chromosomes(params.clone(), vec![bits("000")]).unwrap_err(),
            GaError::DimensionMismatch {
                expected: 7,
                actual: 3
            }
        );
        assert!(Individual::from_chromosomes(params, vec![]).is_err());
    }

    #[test]
    fn test_decode_within_domain() {
        let params = params_2d();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let ind = Individual::random(params.clone(), &mut rng);
            for (x, interval) in ind.decode().iter().zip(params.intervals()) {
                assert!(interval.contains(*x), "{x} outside {interval:?}");
            }
        }
    }

    #[test]
    fn test_crossover_copies_head_and_tail() {
        let params = Arc::new(FunctionParams::single(0.0, 10.0, 0.1).unwrap());
        let a = Individual::from_chromosomes(params.clone(), vec![bits("1111111")]).unwrap();
        let b = Individual::from_chromosomes(params.clone(), vec![bits("0000000")]).unwrap();
        let mut child = a.clone();

        child.crossover(&a, &b, 3, 0).unwrap();
        assert_eq!(child.chromosome(0).unwrap(), bits("1110000").as_slice());

        child.crossover(&b, &a, 5, 0).unwrap();
        assert_eq!(child.chromosome(0).unwrap(), bits("0000011").as_slice());
    }

    #[test]
    fn test_crossover_extreme_cut_points() {
        let params = Arc::new(FunctionParams::single(0.0, 10.0, 0.1).unwrap());
        let a = Individual::from_chromosomes(params.clone(), vec![bits("1010101")]).unwrap();
        let b = Individual::from_chromosomes(params.clone(), vec![bits("0101010")]).unwrap();
        let mut child = a.clone();

        child.crossover(&a, &b, 0, 0).unwrap();
        assert_eq!(child.chromosomes(), b.chromosomes());
        child.crossover(&a, &b, 7, 0).unwrap();
        assert_eq!(child.chromosomes(), a.chromosomes());
    }

    #[test]
    fn test_crossover_only_touches_one_dimension() {
        let params = params_2d();
        let mut rng = StdRng::seed_from_u64(11);
        let a = Individual::random(params.clone(), &mut rng);
        let b = Individual::random(params, &mut rng);
        let mut child = a.clone();

        child.crossover(&b, &b, 4, 1).unwrap();
        assert_eq!(child.chromosome(0), a.chromosome(0));
        assert_eq!(child.chromosome(1), b.chromosome(1));
    }

    #[test]
    fn test_crossover_rejects_bad_cut() {
        let params = Arc::new(FunctionParams::single(0.0, 10.0, 0.1).unwrap());
        let a = Individual::from_chromosomes(params.clone(), vec![bits("1111111")]).unwrap();
        let mut child = a.clone();
        assert_eq!(
            child.crossover(&a, &a, 8, 0),
            Err(GaError::CutPointOutOfRange {
                dimension: 0,
                cut_point: 8,
                length: 7
            })
        );
        assert!(child.crossover(&a, &a, 1, 3).is_err());
        assert_eq!(child, a);
    }

    #[test]
    fn test_mutate_flips_one_bit() {
        let params = Arc::new(FunctionParams::single(0.0, 10.0, 0.1).unwrap());
        let mut ind = Individual::from_chromosomes(params, vec![bits("0000000")]).unwrap();
        assert!(ind.mutate(0, 2));
        assert_eq!(ind.chromosome(0).unwrap(), bits("0010000").as_slice());
        assert!(ind.mutate(0, 2));
        assert_eq!(ind.chromosome(0).unwrap(), bits("0000000").as_slice());
    }

    #[test]
    fn test_mutate_out_of_range_is_noop() {
        let params = Arc::new(FunctionParams::single(0.0, 10.0, 0.1).unwrap());
        let mut ind = Individual::from_chromosomes(params, vec![bits("0000000")]).unwrap();
        let before = ind.clone();
        assert!(!ind.mutate(0, 7));
        assert!(!ind.mutate(1, 0));
        assert_eq!(ind, before);
    }

    #[test]
    fn test_clone_is_independent() {
        let params = Arc::new(FunctionParams::single(0.0, 10.0, 0.1).unwrap());
        let mut original = Individual::from_chromosomes(params, vec![bits("0000000")]).unwrap();
        original.set_fitness(3.5);
        let mut copy = original.clone();
        copy.mutate(0, 0);
        copy.set_fitness(1.0);
        assert_eq!(original.chromosome(0).unwrap(), bits("0000000").as_slice());
        assert_eq!(original.fitness(), 3.5);
    }

    #[test]
    fn test_evaluate_caches_fitness() {
        let params = Arc::new(FunctionParams::single(0.0, 10.0, 0.1).unwrap());
        // gray 1000000 = binary 1111111 -> upper bound
        let mut ind = Individual::from_chromosomes(params, vec![bits("1000000")]).unwrap();
        let f = ind.evaluate(|x| x[0] * 2.0);
        assert!((f - 20.0).abs() < 1e-9);
        assert_eq!(ind.fitness(), f);
    }

    #[test]
    fn test_log_line_format() {
        let params = Arc::new(
            FunctionParams::from_bounds(&[0.0, 0.0], &[10.0, 10.0], &[0.1, 0.1]).unwrap(),
        );
        let mut ind =
            Individual::from_chromosomes(params, vec![bits("0000000"), bits("1000000")]).unwrap();
        ind.set_fitness(1.5);
        assert_eq!(
            ind.log_line(-2.0),
            "| 0000000 1000000 |\t0.00 10.00\t1.50\t-2.00"
        );
    }
}
