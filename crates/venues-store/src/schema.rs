//! Column lists and shared SQL fragments.
//!
//! The tables themselves are created by the migrations in the workspace
//! `migrations/` directory.

/// Stored venue columns.
pub const VENUE_COLUMNS: &str =
    "id, name, location, description, working_hours, maximum_capacity, venue_type_id, average_rating";

/// Stored rating columns.
pub const RATING_COLUMNS: &str = "id, venue_id, rating, username, comment";

/// Stored reservation columns.
pub const RESERVATION_COLUMNS: &str = "id, user_id, venue_id, datetime, number_of_guests";

/// Venues with a stored average above `$3` and seats left in the window
/// `[$1, $2)`, exposed as the `suggested` relation with a `free_seats`
/// column.
pub const SUGGESTED_VENUES_CTE: &str = r"
WITH occupancy AS (
    SELECT venue_id, SUM(number_of_guests)::INTEGER AS guests
    FROM reservations
    WHERE datetime >= $1 AND datetime < $2
    GROUP BY venue_id
),
suggested AS (
    SELECT v.*, v.maximum_capacity - COALESCE(o.guests, 0) AS free_seats
    FROM venues v
    LEFT JOIN occupancy o ON o.venue_id = v.id
    WHERE v.average_rating > $3
)
";

/// Predicate for the filtered listing: `$1` is an optional search text
/// matched against name and description, `$2` an optional type id array.
pub const FILTERED_VENUES_PREDICATE: &str = r"
WHERE ($1::TEXT IS NULL
       OR STRPOS(LOWER(name), LOWER($1)) > 0
       OR STRPOS(LOWER(description), LOWER($1)) > 0)
  AND ($2::INTEGER[] IS NULL OR venue_type_id = ANY($2))
";
