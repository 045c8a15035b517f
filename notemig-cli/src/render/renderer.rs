use notemig_core::RunSummary;
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
    pub dry_run: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(opts: RenderOptions) -> Self {
        let mut skin = MadSkin::default();
        skin.bold.set_fg(Color::Yellow);
        skin.inline_code.set_fg(Color::Cyan);
        Self { skin, opts }
    }

    pub fn print_md(&self, md: &str) {
        self.skin.print_text(md);
    }

    pub fn print_info(&self, message: &str) {
        let md = format!("|-|\n| {message} |\n|-|\n");
        if self.opts.use_color {
            self.print_md(&md);
        } else {
            println!("{}", message);
        }
    }

    pub fn print_summary(&self, summary: &RunSummary) {
        let verb = if self.opts.dry_run {
            "Would migrate"
        } else {
            "Migrated"
        };
        self.print_info(&format!(
            "{verb} {} notes ({} links rewritten).",
            summary.report.notes.len(),
            summary.report.links_rewritten
        ));

        let stats = &summary.stats;
        let lines = [
            format!("* files read: **{}**", stats.visited),
            format!("* deleted notes skipped: **{}**", stats.deleted),
            format!("* duplicate titles replaced: **{}**", stats.duplicates),
            format!("* attachments copied: **{}**", summary.report.attachments.len()),
        ];
        for line in lines {
            if self.opts.use_color {
                self.print_md(&line);
            } else {
                println!("{}", line.replace("**", ""));
            }
        }

        if stats.duplicates > 0 {
            let warning = "Some notes shared a title and were overwritten; see the warnings above.";
            if self.opts.use_color {
                println!("{}", warning.with(Color::Red));
            } else {
                println!("{warning}");
            }
        }
    }
}
