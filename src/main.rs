use anyhow::Result;
use clap::{Parser, Subcommand};
use kit::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "kit",
    version = "0.1.0",
    about = "A single-user, local-first version control engine",
    long_about = "kit keeps full snapshots of your files in a content-addressed \
    store under .kit, with branches, a staging area, three-way merges and \
    filesystem remotes. It is a learning-scale engine, not a git replacement.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "Creates the .kit marker directory with the deterministic \
        root commit and a single master branch, in the current directory or at \
        the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage a file for the next commit",
        long_about = "Snapshots the file's current content into the blob store \
        and stages it. Re-adding a file whose content matches the current \
        commit unstages it instead."
    )]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit from the staging area",
        long_about = "Records the current commit's tracked files with the \
        staged additions and removals applied, then advances the active branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Stage a file for removal",
        long_about = "Unstages the file if it was staged for addition; if the \
        current commit tracks it, stages it for removal and deletes it from \
        the working tree."
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(
        name = "log",
        about = "Show the active branch's history",
        long_about = "Walks first-parent links from HEAD back to the root \
        commit, printing each commit's id, date and message."
    )]
    Log,
    #[command(
        name = "global-log",
        about = "Show every commit ever made",
        long_about = "Prints every commit in the store in id order, regardless \
        of reachability from any branch."
    )]
    GlobalLog,
    #[command(
        name = "find",
        about = "Print the ids of commits with an exact message",
        long_about = "Scans every stored commit and prints the ids of those \
        whose full message equals the given one."
    )]
    Find {
        #[arg(index = 1, help = "The exact commit message to search for")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show branches, staged changes and untracked files"
    )]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "Three forms: 'checkout <branch>' switches branches; \
        'checkout -- <file>' restores a file from HEAD; \
        'checkout <commit> -- <file>' restores a file from any commit, where \
        the commit id may be abbreviated to a unique prefix."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch name or commit id prefix")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(
        name = "branch",
        about = "Create a branch pointing at the current commit"
    )]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Move the active branch to a commit",
        long_about = "Checks out the given commit's files, moves HEAD and the \
        active branch pointer to it and clears the staging area. The commit id \
        may be abbreviated to a unique prefix."
    )]
    Reset {
        #[arg(index = 1, help = "The commit id prefix")]
        commit: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into the active branch",
        long_about = "Three-way merge against the split point of the two \
        branches. Conflicting files are rewritten with conflict markers and \
        committed; a target already contained in the history fast-forwards."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
    #[command(
        name = "add-remote",
        about = "Register a remote repository by path"
    )]
    AddRemote {
        #[arg(index = 1, help = "The remote name")]
        name: String,
        #[arg(index = 2, help = "Path to the remote's .kit directory")]
        path: String,
    },
    #[command(name = "rm-remote", about = "Forget a registered remote")]
    RmRemote {
        #[arg(index = 1, help = "The remote name")]
        name: String,
    },
    #[command(
        name = "push",
        about = "Append local history to a remote branch",
        long_about = "Copies missing commits and blobs to the remote store and \
        fast-forwards the remote branch pointer to the local head."
    )]
    Push {
        #[arg(index = 1, help = "The remote name")]
        remote: String,
        #[arg(index = 2, help = "The remote branch name")]
        branch: String,
    },
    #[command(
        name = "fetch",
        about = "Copy a remote branch's history into the local store",
        long_about = "Downloads missing commits and blobs and points the \
        tracking branch <remote>/<branch> at the fetched tip."
    )]
    Fetch {
        #[arg(index = 1, help = "The remote name")]
        remote: String,
        #[arg(index = 2, help = "The remote branch name")]
        branch: String,
    },
    #[command(
        name = "pull",
        about = "Fetch a remote branch and merge it",
        long_about = "Equivalent to 'fetch' followed by 'merge' of the \
        tracking branch."
    )]
    Pull {
        #[arg(index = 1, help = "The remote name")]
        remote: String,
        #[arg(index = 2, help = "The remote branch name")]
        branch: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Init { path } = &cli.command {
        match path {
            Some(path) => Repository::init(path, Box::new(std::io::stdout()))?,
            None => {
                let pwd = std::env::current_dir()?;
                Repository::init(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
            }
        };
        return Ok(());
    }

    let pwd = std::env::current_dir()?;
    let mut repository = Repository::open(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Add { file } => {
            repository.add(file)?;
            repository.save()?;
        }
        Commands::Commit { message } => {
            repository.commit(message)?;
            repository.save()?;
        }
        Commands::Rm { file } => {
            repository.rm(file)?;
            repository.save()?;
        }
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(message)?,
        Commands::Status => repository.status()?,
        Commands::Checkout { target, file } => {
            match (target, file) {
                (Some(target), Some(file)) => {
                    repository.checkout_file_from_commit(target, file)?
                }
                (None, Some(file)) => repository.checkout_file_from_head(file)?,
                (Some(target), None) => repository.checkout_branch(target)?,
                (None, None) => anyhow::bail!("Incorrect operands."),
            }
            repository.save()?;
        }
        Commands::Branch { name } => {
            repository.branch(name)?;
            repository.save()?;
        }
        Commands::RmBranch { name } => {
            repository.rm_branch(name)?;
            repository.save()?;
        }
        Commands::Reset { commit } => {
            repository.reset(commit)?;
            repository.save()?;
        }
        Commands::Merge { branch } => {
            repository.merge(branch)?;
            repository.save()?;
        }
        Commands::AddRemote { name, path } => {
            repository.add_remote(name, path)?;
            repository.save()?;
        }
        Commands::RmRemote { name } => {
            repository.rm_remote(name)?;
            repository.save()?;
        }
        Commands::Push { remote, branch } => {
            repository.push(remote, branch)?;
            repository.save()?;
        }
        Commands::Fetch { remote, branch } => {
            repository.fetch(remote, branch)?;
            repository.save()?;
        }
        Commands::Pull { remote, branch } => {
            repository.pull(remote, branch)?;
            repository.save()?;
        }
    }

    Ok(())
}
