//! Tests for the `QtClusterer` public API surface.

mod common;

use common::WordLengths;
use qtclust_core::{
    CachingCalculator, Clusterer, DistanceCalculator, ExecutionStrategy, MclClusterer,
    ProgressEvent, QtClustererBuilder, QtError,
};
use rstest::{fixture, rstest};

#[fixture]
fn animals() -> WordLengths {
    WordLengths::new(&["ox", "ant", "cat", "dog", "horse", "rabbit"])
}

#[rstest]
#[case::sequential(ExecutionStrategy::Sequential)]
#[case::parallel(ExecutionStrategy::Parallel)]
fn clusters_words_by_length(#[case] strategy: ExecutionStrategy, animals: WordLengths) {
    let mut calculator = animals;
    let mut clusterer = QtClustererBuilder::new(calculator.len())
        .with_threads(2)
        .with_execution_strategy(strategy)
        .build()
        .expect("configuration must be valid");

    let clusters = clusterer
        .cluster(&mut calculator, 0.5)
        .expect("clustering must succeed");
    // Three three-letter words first, then the remaining singletons by seed.
    assert_eq!(
        clusters,
        vec![vec![1, 2, 3], vec![0], vec![4], vec![5]]
    );
    assert_eq!(clusterer.clusters(), clusters);
}

#[rstest]
fn caching_wrapper_is_a_drop_in_replacement(animals: WordLengths) {
    let mut plain = animals.clone();
    let mut cached = CachingCalculator::new(animals);

    let mut first = QtClustererBuilder::new(plain.len())
        .with_execution_strategy(ExecutionStrategy::Sequential)
        .build()
        .expect("configuration must be valid");
    let mut second = QtClustererBuilder::new(cached.inner().len())
        .with_execution_strategy(ExecutionStrategy::Sequential)
        .build()
        .expect("configuration must be valid");

    let expected = first
        .cluster(&mut plain, 1.0)
        .expect("clustering must succeed");
    let actual = second
        .cluster(&mut cached, 1.0)
        .expect("clustering must succeed");
    assert_eq!(actual, expected);
}

#[rstest]
fn observer_events_bracket_the_pass(animals: WordLengths) {
    let mut calculator = animals;
    let instances = calculator.len();
    let mut clusterer = QtClustererBuilder::new(instances)
        .build()
        .expect("configuration must be valid");

    let mut events = Vec::new();
    let clusters = {
        let mut observer = |event: ProgressEvent| events.push(event);
        clusterer
            .cluster_with_observer(&mut calculator, 0.5, &mut observer)
            .expect("clustering must succeed")
    };

    assert_eq!(events.first(), Some(&ProgressEvent::PassStarted { instances }));
    assert_eq!(
        events.last(),
        Some(&ProgressEvent::PassCompleted {
            clusters: clusters.len()
        })
    );
}

#[rstest]
fn backends_share_the_clusterer_surface(animals: WordLengths) {
    fn latest<T, C>(backend: &mut T, calculator: &mut C, threshold: f64) -> Vec<Vec<usize>>
    where
        T: Clusterer,
        C: DistanceCalculator + Sync,
    {
        backend
            .cluster(calculator, threshold)
            .expect("clustering must succeed");
        backend.clusters()
    }

    let mut calculator = animals;
    let mut engine = QtClustererBuilder::new(calculator.len())
        .build()
        .expect("configuration must be valid");
    let clusters = latest(&mut engine, &mut calculator, 0.5);
    assert_eq!(clusters, vec![vec![1, 2, 3], vec![0], vec![4], vec![5]]);

    // The external backend is a drop-in for the same generic call; precomputed
    // output keeps the test independent of an installed `mcl` executable.
    let external =
        MclClusterer::from_output("1 2 3\n0\n4\n5\n".as_bytes()).expect("output must parse");
    assert_eq!(external.clusters(), clusters);
}

#[rstest]
fn builder_validates_the_worker_hint() {
    let err = QtClustererBuilder::new(4)
        .with_threads(0)
        .build()
        .expect_err("zero workers must be rejected");
    assert!(matches!(err, QtError::InvalidThreadCount { got: 0 }));
}

#[rstest]
#[case::sequential(ExecutionStrategy::Sequential)]
#[case::parallel(ExecutionStrategy::Parallel)]
fn repeated_passes_reuse_one_engine(#[case] strategy: ExecutionStrategy, animals: WordLengths) {
    let mut calculator = animals;
    let mut clusterer = QtClustererBuilder::new(calculator.len())
        .with_execution_strategy(strategy)
        .build()
        .expect("configuration must be valid");

    let tight = clusterer
        .cluster(&mut calculator, 0.5)
        .expect("clustering must succeed");
    let loose = clusterer
        .cluster(&mut calculator, 10.0)
        .expect("clustering must succeed");
    assert!(loose.len() <= tight.len());
    assert_eq!(clusterer.clusters(), loose);
}
