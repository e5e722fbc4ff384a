mod arrivals;
mod dist;
mod packet;
mod queues;
mod simulator;
mod sweep;
