//! Per-type loggers shared through a trait.
//!
//! Each animal type logs through its own named logger. A single root setup
//! covers them all via fallback, and one noisy type can be silenced
//! without touching the rest.

use logkit::Logger;

trait Speak {
    fn logger(&self) -> &Logger;
    fn sound(&self) -> String;

    fn speak(&self) {
        let sound = self.sound();
        self.logger().info(format!("says {}", sound));
    }
}

struct Dog {
    logger: Logger,
}

impl Dog {
    fn new() -> Self {
        Self {
            logger: logkit::registry().logger("animals.dog"),
        }
    }
}

impl Speak for Dog {
    fn logger(&self) -> &Logger {
        &self.logger
    }

    fn sound(&self) -> String {
        "woof".to_string()
    }
}

struct Cat {
    logger: Logger,
}

impl Cat {
    fn new() -> Self {
        Self {
            logger: logkit::registry().logger("animals.cat"),
        }
    }
}

impl Speak for Cat {
    fn logger(&self) -> &Logger {
        &self.logger
    }

    fn sound(&self) -> String {
        "meow".to_string()
    }
}

fn main() {
    // One root setup covers every animal logger through fallback.
    logkit::builder()
        .with_app("sounds")
        .with_file(false)
        .with_console_format("{timestamp} [{level}] {name}: {message}")
        .setup();

    let animals: Vec<Box<dyn Speak>> = vec![Box::new(Dog::new()), Box::new(Cat::new())];
    for animal in &animals {
        animal.speak();
    }

    // Silence the dog without touching the cat.
    logkit::builder()
        .with_logger_name("animals.dog")
        .with_console(false)
        .with_file(false)
        .setup();

    println!("--- after silencing the dog ---");
    for animal in &animals {
        animal.speak();
    }
}
