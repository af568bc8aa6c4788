use clap::Parser;

use crate::bootstrap::bootstrap_cmd;
use crate::post::post_cmd;

mod bootstrap;
mod decompress;
mod post;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Scaffold a new post file
    Post(PostArgs),
    /// Bootstrap a new blog
    Bootstrap(BootstrapArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct PostArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Language of the post (ja or en)
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// Directory where the post file is created. Writes to stdout when empty
    #[arg(short, long)]
    out_dir: Option<String>,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct BootstrapArgs {
    /// Directory where the new blog will be generated
    #[arg(short, long)]
    out_dir: String,
}

fn main() {
    let args = Args::parse();

    match args {
        Args::Post(args) => post_cmd(args),
        Args::Bootstrap(args) => bootstrap_cmd(args),
    };
}
