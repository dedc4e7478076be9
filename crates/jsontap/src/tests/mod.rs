
mod arrays;
mod paths;
