// src/config/consts.rs

// Upstream
pub const API_BASE: &str = "https://uniclubs.ch/api/external/v1";
pub const SITE_BASE: &str = "https://uniclubs.ch";
pub const CDN_BASE: &str = "https://d396kn70sxtfio.cloudfront.net";
pub const CLUB_SLUG: &str = "philosophy-club";
pub const API_KEY_ENV: &str = "UNICLUBS_API_KEY";
pub const API_KEY_HEADER: &str = "X-API-Key";
pub const USER_AGENT: &str = "clubfeed/0.4";

// Net
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const PAGE_LIMIT: u32 = 200;
pub const MAX_PAGES: u32 = 100;
pub const MAX_RETRIES: u32 = 3;
pub const RETRY_BASE_MS: u64 = 1_000; // 1s, 2s, 4s

// Scrape
pub const EVENTS_KEY: &str = "events";
pub const EVENTS_SIBLING_KEY: &str = "tiers";

// Local files
pub const STORE_DIR: &str = ".store";
pub const DUMP_FILE: &str = "events-raw.txt";
pub const DUMP_LIMIT_CHARS: usize = 20_000;
pub const DEFAULT_TARGET: &str = "docs/data/events.json";
pub const DEFAULT_EVENTS_DATA: &str = "data/events.json";
pub const DEFAULT_POSTS_DATA: &str = "data/posts.json";
pub const DEFAULT_BOARD_DATA: &str = "data/board.json";

// Calendar
pub const ICS_PRODID: &str = "-//Philosophy Club St. Gallen//Event//EN";
pub const ICS_UID_DOMAIN: &str = "philosophyclubsg.com";
pub const ICS_DEFAULT_HOURS: i64 = 2;

// Posts
pub const EXCERPT_CHARS: usize = 200;
