use colored::Colorize;

pub fn print_help() {
    println!("{:━^60}", " GPT VISION ".yellow());
    println!("Usage:");
    println!("  {} <command> [arguments]", "gpt-vision".bold().green());
    println!("\nCommands:");
    println!(
        "  {}   Run the vision proxy on {}.",
        "serve".bold().cyan(),
        "VISION_BIND_ADDR".bold()
    );
    println!(
        "  {}    Interactive chat through the proxy.",
        "chat".bold().magenta()
    );
    println!(
        "  {}     Ask one question about an image.",
        "ask".bold().red()
    );
    println!(
        "  {}     Display this help message.",
        "-h, -help".bold().blue()
    );
    println!("\nArguments:");
    println!(
        "  {}  Image (JPEG, PNG, WEBP or GIF, up to 20MB) and optional question.",
        "ask <image_path> [question]".bold().red()
    );
    println!("\nIn chat:");
    println!("  {}  Attach an image to the next message.", "/image <path>".bold());
    println!("  {}          Drop the attached image.", "/clear".bold());
    println!("  {}           Exit.", "/quit".bold());
    println!("\nEnvironment:");
    println!("  OPENAI_API_KEY (required by serve), OPENAI_API_URL, VISION_MODEL,");
    println!("  VISION_BIND_ADDR, VISION_PROXY_URL");
    println!("\nExamples:");
    println!("  {}", "gpt-vision serve".bold().cyan());
    println!(
        "  {} rust_astronaut.jpg What colors are in this image?",
        "gpt-vision ask".bold().red()
    );
    println!("{:━^60}", "".yellow());
}
