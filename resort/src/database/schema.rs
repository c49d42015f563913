//! Database schema definitions and SQL constants.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value metadata, including the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Room bookings.
///
/// `booking_code` is UNIQUE so that two writers can never both commit the
/// same code; the same index serves the max-scan of the allocator.
/// AUTOINCREMENT keeps identities from being reused.
pub const CREATE_ROOM_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS room_bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        booking_code TEXT NOT NULL UNIQUE,
        full_name TEXT NOT NULL,
        phone TEXT NOT NULL,
        email TEXT NOT NULL,
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        room_type TEXT,
        guests INTEGER NOT NULL,
        children INTEGER NOT NULL DEFAULT 0,
        num_rooms INTEGER NOT NULL DEFAULT 1,
        cottage_count INTEGER NOT NULL DEFAULT 0,
        suite_count INTEGER NOT NULL DEFAULT 0,
        deluxe_count INTEGER NOT NULL DEFAULT 0,
        family_count INTEGER NOT NULL DEFAULT 0,
        special_requests TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'pending'
            CHECK (status IN ('pending', 'confirmed', 'cancelled')),
        booked_by_admin INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL
    )";

/// Event bookings.
pub const CREATE_EVENT_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS event_bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        booking_code TEXT NOT NULL UNIQUE,
        full_name TEXT NOT NULL,
        phone TEXT NOT NULL,
        email TEXT NOT NULL,
        event_date TEXT NOT NULL,
        event_type TEXT NOT NULL,
        expected_guests INTEGER NOT NULL,
        budget_range TEXT NOT NULL,
        notes TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'pending'
            CHECK (status IN ('pending', 'confirmed', 'cancelled')),
        booked_by_admin INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL
    )";

/// Gallery images. `deleted_at` is in milliseconds so the recycle bin
/// orders deletions made within the same second.
pub const CREATE_GALLERY_IMAGES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS gallery_images (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        image_url TEXT NOT NULL,
        sort_order INTEGER NOT NULL DEFAULT 0 CHECK (sort_order >= 0),
        is_active INTEGER NOT NULL DEFAULT 1,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        deleted_at INTEGER,
        created_at INTEGER NOT NULL
    )";

/// Explore cards.
pub const CREATE_EXPLORE_CARDS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS explore_cards (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        short_description TEXT NOT NULL,
        full_description TEXT NOT NULL DEFAULT '',
        image_url TEXT NOT NULL,
        sort_order INTEGER NOT NULL DEFAULT 0 CHECK (sort_order >= 0),
        is_active INTEGER NOT NULL DEFAULT 1,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        deleted_at INTEGER,
        created_at INTEGER NOT NULL
    )";

/// Hero slides.
pub const CREATE_HERO_SLIDES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS hero_slides (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        subtitle TEXT NOT NULL,
        image_url TEXT NOT NULL,
        sort_order INTEGER NOT NULL DEFAULT 0 CHECK (sort_order >= 0),
        is_active INTEGER NOT NULL DEFAULT 1,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        deleted_at INTEGER,
        created_at INTEGER NOT NULL
    )";

/// The site content singleton. Only row 1 may exist.
pub const CREATE_SITE_CONTENT_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS site_content (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        slide1_title TEXT NOT NULL,
        slide1_subtitle TEXT NOT NULL,
        slide2_title TEXT NOT NULL,
        slide2_subtitle TEXT NOT NULL,
        slide3_title TEXT NOT NULL,
        slide3_subtitle TEXT NOT NULL,
        phone TEXT NOT NULL,
        email TEXT NOT NULL,
        address TEXT NOT NULL,
        map_link TEXT NOT NULL,
        facebook TEXT NOT NULL,
        instagram TEXT NOT NULL,
        twitter TEXT NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// Indices over the booking and content tables.
///
/// Listings filter on the deletion and active flags and sort by
/// `(sort_order, id)`; the recycle bin sorts by `deleted_at`.
pub const CREATE_INDICES: [&str; 8] = [
    "CREATE INDEX IF NOT EXISTS idx_room_bookings_created ON room_bookings(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_event_bookings_created ON event_bookings(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_gallery_images_live ON gallery_images(is_deleted, is_active, sort_order, id)",
    "CREATE INDEX IF NOT EXISTS idx_gallery_images_bin ON gallery_images(is_deleted, deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_explore_cards_live ON explore_cards(is_deleted, is_active, sort_order, id)",
    "CREATE INDEX IF NOT EXISTS idx_explore_cards_bin ON explore_cards(is_deleted, deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_hero_slides_live ON hero_slides(is_deleted, is_active, sort_order, id)",
    "CREATE INDEX IF NOT EXISTS idx_hero_slides_bin ON hero_slides(is_deleted, deleted_at)",
];

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
