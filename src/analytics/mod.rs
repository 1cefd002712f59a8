// THEORY:
// The `analytics` module holds the small aggregation helpers behind the
// occupancy dashboard panels. None of them is more than a sort, a sum or a
// max over the caller's data; they live here so that the HTTP adapter stays
// a thin shell and the arithmetic is tested once.
//
// - `fixtures`: the sample floor (five zones, seven flows).
// - `zones`: ranking and density levels for the zone performance table.
// - `flows`: zone-to-zone movement summary.
// - `alerts`: congestion alerts derived from zone densities.
// - `footfall`: inflow/outflow totals and the peak interval.

pub mod alerts;
pub mod fixtures;
pub mod flows;
pub mod footfall;
pub mod zones;
