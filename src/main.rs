//! # fxregion CLI
//!
//! Usage:
//!   fxregion scene.json -o layout.json
//!   echo '{ ... }' | fxregion
//!   fxregion --example > scene.json
//!
//! Set `RUST_LOG=debug` to see how styles were resolved.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    // Handle --example flag
    if args.iter().any(|a| a == "--example") {
        print!("{}", example_scene_json());
        return;
    }

    // Read input
    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).unwrap_or_else(|e| fail(&format!("Failed to read {}: {}", args[1], e)))
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            fail(&format!("Failed to read stdin: {}", e));
        }
        buf
    };

    // Parse output path
    let output_path = args.windows(2).find(|w| w[0] == "-o").map(|w| w[1].clone());

    let info = match fxregion::layout_json(&input) {
        Ok(info) => info,
        Err(e) => fail(&format!("Failed to lay out scene: {}", e)),
    };
    let json = match serde_json::to_string_pretty(&info) {
        Ok(json) => json,
        Err(e) => fail(&format!("Failed to serialize layout: {}", e)),
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                fail(&format!("Failed to write {}: {}", path, e));
            }
            eprintln!("✓ Laid out {}x{} scene to {}", info.width, info.height, path);
        }
        None => println!("{}", json),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("✗ {}", message);
    process::exit(1);
}

fn example_scene_json() -> &'static str {
    r##"{
  "width": 480,
  "height": 320,
  "root": {
    "kind": { "type": "BorderPane" },
    "name": "window",
    "style": "-fx-background-color: #f4f4f8; -fx-padding: 8; -fx-border-color: #44475a; -fx-border-width: 1",
    "children": [
      {
        "kind": { "type": "Block", "pref": { "width": 200, "height": 32 } },
        "name": "toolbar",
        "slot": "Top",
        "margin": { "top": 0, "right": 0, "bottom": 8, "left": 0 }
      },
      {
        "kind": { "type": "Block", "pref": { "width": 120, "height": 100 }, "max": { "width": 120, "height": 1e9 } },
        "name": "sidebar",
        "slot": "Left"
      },
      {
        "kind": { "type": "StackPane" },
        "name": "content",
        "slot": "Center",
        "style": "-fx-background-color: white, linear-gradient(to bottom, #ffffff, #e8e8f0); -fx-background-insets: 0, 1; -fx-background-radius: 4, 3",
        "padding": { "top": 12, "right": 12, "bottom": 12, "left": 12 },
        "children": [
          {
            "kind": { "type": "Block", "pref": { "width": 240, "height": 20 }, "bias": "Horizontal", "area": 4800, "baseline": 14 },
            "name": "paragraph"
          },
          {
            "kind": { "type": "Rectangle", "width": 16, "height": 16 },
            "name": "badge",
            "alignment": "TopRight"
          }
        ]
      },
      {
        "kind": { "type": "Block", "pref": { "width": 200, "height": 24 } },
        "name": "status",
        "slot": "Bottom"
      }
    ]
  }
}
"##
}
