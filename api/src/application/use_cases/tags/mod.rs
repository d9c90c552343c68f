pub mod word_cloud;
