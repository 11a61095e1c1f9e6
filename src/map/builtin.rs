//! Built-in fallback map: a 20×20 room with a solid green border.

/// Loaded when no map file is given on the command line.
pub const BUILTIN_ROOM: &str = concat!(
    "WWWWWWWWWWWWWWWWWWWW\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "W                  W\n",
    "WWWWWWWWWWWWWWWWWWWW\n",
    "\n",
    "2 2 45\n",
    "ceiling 50 50 50\n",
    "floor 0 0 0\n",
    "W 0 255 0\n",
);
