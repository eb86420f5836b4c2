//! Run partitioner tests
//!
//! Covers the shared-boundary render convention, the edge-owned stats
//! convention, and the conservation property tying stats buckets to the
//! polyline's haversine length.

use route_annotator::haversine::path_length_m;
use route_annotator::palette::DEFAULT_COLOR;
use route_annotator::partition::{
    distance_breakdown, partition_for_render, partition_for_stats, segment_colors,
};
use route_annotator::track::Track;

mod fixtures;
use fixtures::{boolean, points_of, text_track, vertices_along_parallel};

// ============================================================================
// Render partition
// ============================================================================

#[test]
fn render_segments_share_boundary_points() {
    let vertices = vertices_along_parallel(13.0, 0.01, 4);
    let points = points_of(&vertices);
    let track = text_track(&[Some("A"), Some("A"), Some("B"), Some("B")]);

    let segments = partition_for_render(&track, &points);

    assert_eq!(segments.len(), 2);
    // Segment 1 spans vertices [0, 1, 2]: the first B-vertex closes it.
    assert_eq!(segments[0].points, points[0..=2].to_vec());
    assert_eq!(segments[1].points, points[2..=3].to_vec());
}

#[test]
fn render_point_counts_sum_to_n_plus_segments_minus_one() {
    let vertices = vertices_along_parallel(13.0, 0.01, 7);
    let points = points_of(&vertices);
    let track = text_track(&[
        Some("A"),
        Some("A"),
        Some("B"),
        None,
        None,
        Some("C"),
        Some("C"),
    ]);

    let segments = partition_for_render(&track, &points);
    let total_points: usize = segments.iter().map(|s| s.points.len()).sum();

    assert_eq!(segments.len(), 4);
    assert_eq!(total_points, points.len() + segments.len() - 1);
}

#[test]
fn nulls_form_one_equivalence_class() {
    let vertices = vertices_along_parallel(13.0, 0.01, 4);
    let points = points_of(&vertices);
    let track = text_track(&[None, None, None, None]);

    let segments = partition_for_render(&track, &points);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].value, None);
    assert_eq!(segments[0].points.len(), 4);
}

#[test]
fn trailing_single_point_merges_into_previous_segment() {
    let vertices = vertices_along_parallel(13.0, 0.01, 3);
    let points = points_of(&vertices);
    let track = text_track(&[Some("A"), Some("A"), Some("B")]);

    let segments = partition_for_render(&track, &points);

    // The lone B point is already the previous segment's shared boundary.
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].end, 3);
    assert_eq!(segments[0].points.len(), 3);
}

#[test]
fn single_vertex_polyline_yields_no_segments() {
    let vertices = vertices_along_parallel(13.0, 0.01, 1);
    let points = points_of(&vertices);
    let track = text_track(&[Some("A")]);

    assert!(partition_for_render(&track, &points).is_empty());
    assert!(partition_for_render(&Track::new(), &[]).is_empty());
}

#[test]
fn short_track_is_treated_as_null_padded() {
    let vertices = vertices_along_parallel(13.0, 0.01, 4);
    let points = points_of(&vertices);
    let track = text_track(&[Some("A"), Some("A")]);

    let segments = partition_for_render(&track, &points);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].value, None);
}

// ============================================================================
// Stats partition
// ============================================================================

#[test]
fn stats_buckets_conserve_total_length() {
    let vertices = vertices_along_parallel(13.0, 0.013, 9);
    let track = text_track(&[
        Some("asphalt"),
        Some("asphalt"),
        Some("gravel"),
        Some("asphalt"),
        Some("gravel"),
        Some("gravel"),
        Some("paved"),
        Some("asphalt"),
        Some("asphalt"),
    ]);

    let buckets = partition_for_stats(&track, &vertices);
    let bucket_sum: f64 = buckets.values().sum();
    let full_length = path_length_m(&points_of(&vertices));

    let relative_error = (bucket_sum - full_length).abs() / full_length;
    assert!(
        relative_error < 1e-6,
        "buckets must partition the polyline exactly, error {relative_error}"
    );
}

#[test]
fn edge_belongs_to_its_start_vertex() {
    let vertices = vertices_along_parallel(13.0, 0.01, 3);
    let track = text_track(&[Some("A"), Some("B"), Some("A")]);

    let buckets = partition_for_stats(&track, &vertices);
    let edge = path_length_m(&points_of(&vertices)) / 2.0;

    assert!((buckets["A"] - edge).abs() < 1e-6);
    assert!((buckets["B"] - edge).abs() < 1e-6);
}

#[test]
fn null_valued_edges_are_skipped() {
    let vertices = vertices_along_parallel(13.0, 0.01, 4);
    let track = text_track(&[Some("A"), None, Some("A"), Some("A")]);

    let buckets = partition_for_stats(&track, &vertices);
    let total: f64 = buckets.values().sum();
    let full_length = path_length_m(&points_of(&vertices));

    assert_eq!(buckets.len(), 1);
    assert!(total < full_length, "the null edge must not be counted");
}

#[test]
fn boolean_values_bucket_as_true_false_strings() {
    let vertices = vertices_along_parallel(13.0, 0.01, 3);
    let track: Track = vec![boolean(true), boolean(false), boolean(true)];

    let buckets = partition_for_stats(&track, &vertices);
    let edge = path_length_m(&points_of(&vertices)) / 2.0;

    assert_eq!(buckets.len(), 2);
    assert!((buckets["true"] - edge).abs() < 1e-6);
    assert!((buckets["false"] - edge).abs() < 1e-6);
}

#[test]
fn non_adjacent_runs_of_one_value_accumulate_into_one_bucket() {
    let vertices = vertices_along_parallel(13.0, 0.01, 5);
    let track = text_track(&[Some("A"), Some("B"), Some("A"), Some("B"), Some("A")]);

    let buckets = partition_for_stats(&track, &vertices);
    let edge = path_length_m(&points_of(&vertices)) / 4.0;

    assert_eq!(buckets.len(), 2);
    assert!((buckets["A"] - 2.0 * edge).abs() < 1e-6);
    assert!((buckets["B"] - 2.0 * edge).abs() < 1e-6);
}

#[test]
fn single_vertex_yields_no_buckets() {
    let vertices = vertices_along_parallel(13.0, 0.01, 1);
    let track = text_track(&[Some("A")]);
    assert!(partition_for_stats(&track, &vertices).is_empty());
}

// ============================================================================
// Statistics panel rows
// ============================================================================

#[test]
fn breakdown_is_sorted_descending_by_distance() {
    let vertices = vertices_along_parallel(13.0, 0.01, 6);
    let track = text_track(&[
        Some("gravel"),
        Some("asphalt"),
        Some("asphalt"),
        Some("asphalt"),
        Some("gravel"),
        Some("gravel"),
    ]);

    let rows = distance_breakdown("surface", &track, &vertices);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].label, "asphalt");
    assert!(rows[0].total_m >= rows[1].total_m);
    assert_ne!(rows[0].color, DEFAULT_COLOR, "known surface gets a table color");
}

#[test]
fn segment_colors_align_with_segments() {
    let vertices = vertices_along_parallel(13.0, 0.01, 4);
    let points = points_of(&vertices);
    let track = text_track(&[Some("asphalt"), Some("asphalt"), None, None]);

    let segments = partition_for_render(&track, &points);
    let colors = segment_colors("surface", &segments);

    assert_eq!(colors.len(), segments.len());
    assert_eq!(colors[1], DEFAULT_COLOR, "null segment uses the default color");
}
