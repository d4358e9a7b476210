use flowfield_core::cloud::link_pairs;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Naive all-pairs reference, the behavior the grid version must match.
fn reference_pairs(points: &[Vec3], max_dist: f32) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if points[i].distance(points[j]) < max_dist {
                pairs.push((i as u32, j as u32));
            }
        }
    }
    pairs
}

fn random_cloud(seed: u64, count: usize, extent: f32) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            )
        })
        .collect()
}

#[test]
fn grid_linking_matches_reference_on_random_clouds() {
    for seed in [1, 2, 3] {
        let points = random_cloud(seed, 200, 30.0);
        let got = link_pairs(&points, 10.0);
        let expected = reference_pairs(&points, 10.0);
        assert_eq!(got, expected, "seed {seed}");
    }
}

#[test]
fn dense_cluster_links_every_pair_once() {
    let points = random_cloud(9, 40, 2.0);
    let pairs = link_pairs(&points, 100.0);
    assert_eq!(pairs.len(), 40 * 39 / 2);
    let mut deduped = pairs.clone();
    deduped.dedup();
    assert_eq!(deduped.len(), pairs.len(), "duplicate pairs emitted");
    for &(i, j) in &pairs {
        assert!(i < j, "pair ({i}, {j}) not ordered");
    }
}

#[test]
fn negative_coordinates_link_correctly() {
    let points = [
        Vec3::new(-50.0, -50.0, -50.0),
        Vec3::new(-49.0, -50.0, -50.0),
        Vec3::new(50.0, 50.0, 50.0),
    ];
    assert_eq!(link_pairs(&points, 5.0), vec![(0, 1)]);
}

#[test]
fn glyph_row_links_neighbors_only() {
    // A dot-matrix row: points every 4 units, threshold under two steps.
    let points: Vec<Vec3> = (0..10).map(|i| Vec3::new(i as f32 * 4.0, 0.0, 0.0)).collect();
    let pairs = link_pairs(&points, 5.0);
    let expected: Vec<(u32, u32)> = (0..9).map(|i| (i, i + 1)).collect();
    assert_eq!(pairs, expected);
}
