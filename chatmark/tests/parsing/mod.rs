mod blocks;
mod inline;
mod references;
mod tables;
