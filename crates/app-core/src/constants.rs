// Interaction and layout tuning shared by the core and the web frontend.

// Gesture timing
pub const HOLD_DURATION_MS: u32 = 500; // press shorter than this is a tap

// Picking
pub const CAPTURE_RADIUS: f32 = 0.2; // max hand-to-entity distance for a hit

// Two-hand transform
pub const SCALE_FACTOR_MIN: f32 = 0.5;
pub const SCALE_FACTOR_MAX: f32 = 3.0;
pub const FORWARD_BIAS: f32 = 0.05; // nudge along camera forward so the object clears the hands

// Idle animation
pub const FIGURE_IDLE_SPIN: f32 = 0.6; // rad/s for figures nobody is holding or marking
pub const DOME_IDLE_SPIN: f32 = 0.06; // rad/s for the video dome

// Input devices
pub const DEVICE_COUNT: usize = 2; // 0 = left, 1 = right

// Scene layout
pub const PLATFORM_POSITION: [f32; 3] = [0.0, -0.1, -0.5];
pub const PLATFORM_SIZE: [f32; 3] = [0.4, 0.02, 0.2];
pub const FIGURE_COUNT: usize = 4;
pub const FIGURE_RADIUS: f32 = 0.03;
pub const FIGURE_HEIGHT: f32 = 0.03; // local y above the platform surface
pub const DOME_RADIUS: f32 = 0.5;
pub const DOME_POSITION: [f32; 3] = [0.0, 0.0, -0.7];

// Default figure tints, consumed by the frontend renderer
pub const FIGURE_COLORS: [[f32; 3]; 4] = [
    [1.0, 0.27, 0.27], // red
    [0.27, 1.0, 0.27], // green
    [0.27, 0.27, 1.0], // blue
    [1.0, 1.0, 0.27],  // yellow
];
